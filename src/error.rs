//! Error taxonomy for the SDK.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure surfaced by the client.
#[derive(Error, Debug)]
pub enum Error {
    /// The remote service reported the resource absent (HTTP 404), or a
    /// find found nothing.
    #[error("{resource} not found: {message}")]
    NotFound { resource: String, message: String },

    #[error("more than one {resource} matches '{name_or_id}'")]
    DuplicateResource { resource: String, name_or_id: String },

    /// Remote validation or business failure, with the service's own code and
    /// message passed through unchanged.
    #[error("API error {status}: {}{message}", code.as_deref().map(|c| format!("[{c}] ")).unwrap_or_default())]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("{operation} is not supported by {resource}")]
    MethodNotSupported {
        resource: &'static str,
        operation: &'static str,
    },

    #[error("{resource} {id} reached failure status {status}")]
    ResourceFailure {
        resource: &'static str,
        id: String,
        status: String,
    },

    #[error("timed out after {waited_secs}s waiting for {resource} {id} to reach {status}")]
    Timeout {
        resource: &'static str,
        id: String,
        status: String,
        waited_secs: u64,
    },

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub(crate) fn not_found(resource: &str, message: impl Into<String>) -> Self {
        Error::NotFound {
            resource: resource.to_string(),
            message: message.into(),
        }
    }

    /// Attribute a transport-level not-found to the resource being accessed.
    pub(crate) fn for_resource(self, resource: &str) -> Self {
        match self {
            Error::NotFound { message, .. } => Error::not_found(resource, message),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_vendor_code() {
        let err = Error::Api {
            status: 400,
            code: Some("CBC.0101".to_string()),
            message: "Invalid parameter.".to_string(),
        };
        assert_eq!(err.to_string(), "API error 400: [CBC.0101] Invalid parameter.");
    }

    #[test]
    fn api_error_display_without_code() {
        let err = Error::Api {
            status: 409,
            code: None,
            message: "Cannot 'pause' instance".to_string(),
        };
        assert_eq!(err.to_string(), "API error 409: Cannot 'pause' instance");
    }

    #[test]
    fn not_found_is_detected() {
        assert!(Error::not_found("server", "gone").is_not_found());
        assert!(!Error::MissingParameter("id".into()).is_not_found());
    }
}
