//! Credentials
//!
//! The client is handed a pre-issued IAM token; obtaining one is outside the
//! scope of this crate. The token can be swapped at runtime (e.g. after the
//! caller refreshes it) without rebuilding the client.

use crate::error::{Error, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Header carrying the IAM token on every request
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// Token holder shared by clones of a client
#[derive(Clone, Default)]
pub struct Credentials {
    token: Arc<RwLock<Option<String>>>,
}

impl Credentials {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token.filter(|t| !t.trim().is_empty()))),
        }
    }

    /// Get the current token for an API call
    pub async fn get_token(&self) -> Result<String> {
        self.token.read().await.clone().ok_or_else(|| {
            Error::Auth("no token configured. Set HWCLOUD_TOKEN or `token` in config".to_string())
        })
    }

    /// Replace the token used by subsequent calls
    pub async fn set_token(&self, token: &str) {
        let mut cache = self.token.write().await;
        *cache = Some(token.to_string());
        tracing::debug!("Auth token replaced");
    }
}

/// Validate a project or domain id: 32 lowercase hex characters
pub fn validate_scope_id(id: &str) -> bool {
    id.len() == 32 && id.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
