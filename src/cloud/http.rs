//! HTTP transport for the cloud REST APIs

use crate::error::{Error, Result};
use reqwest::Client;
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// HTTP verb of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// HTTP client wrapper for the cloud API calls
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("hwcloud/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Send one request and return the parsed JSON body.
    ///
    /// An empty response body is returned as `Value::Null`. Non-2xx statuses
    /// become `Error::NotFound` (404) or `Error::Api` carrying the vendor's
    /// error code and message.
    pub async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        tracing::debug!("{} {}", method.as_str(), url);

        let mut request = self
            .client
            .request(method.to_reqwest(), url)
            .header("Accept", "application/json");

        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        let response_body = response.text().await?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            return Err(error_from_response(status.as_u16(), &response_body));
        }

        if response_body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&response_body)?)
    }
}

/// Map a failed response to the error taxonomy.
fn error_from_response(status: u16, body: &str) -> Error {
    let (code, message) = extract_vendor_error(body);

    if status == 404 {
        return Error::not_found("resource", message);
    }

    Error::Api {
        status,
        code,
        message,
    }
}

/// Pull the vendor error code and message out of an error body.
///
/// Billing endpoints answer `{"error_code": .., "error_msg": ..}`; compute
/// endpoints wrap a `{"code": .., "message": ..}` object in a fault key such
/// as `badRequest` or `itemNotFound`.
fn extract_vendor_error(body: &str) -> (Option<String>, String) {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return (None, sanitize_for_log(body));
    };

    if let Some(message) = value.get("error_msg").and_then(Value::as_str) {
        let code = value
            .get("error_code")
            .and_then(Value::as_str)
            .map(str::to_string);
        return (code, message.to_string());
    }

    if let Some(fault) = value.as_object() {
        for inner in fault.values() {
            if let Some(message) = inner.get("message").and_then(Value::as_str) {
                let code = inner.get("code").and_then(|c| match c {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                });
                return (code, message.to_string());
            }
        }
    }

    (None, sanitize_for_log(body))
}

/// Format a client error for display on a terminal
pub fn describe_error(error: &Error) -> String {
    match error {
        Error::Api { status: 401, .. } => {
            "Authentication failed. Check HWCLOUD_TOKEN or the configured token.".to_string()
        },
        Error::Api { status: 403, .. } => {
            "Permission denied. Check the IAM policies of this account.".to_string()
        },
        Error::Api { status: 429, .. } => "Rate limit exceeded. Please try again later.".to_string(),
        Error::Api {
            status: 500..=599, ..
        } => "Service temporarily unavailable. Please try again.".to_string(),
        Error::NotFound { resource, .. } => format!("{} not found.", capitalize(resource)),
        other => other.to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
