// src/error.rs
//! Error taxonomy for facilitator discovery.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Missing or invalid credentials/settings. Raised before any network call.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The facilitator rejected the credentials (HTTP 401/403).
    #[error("facilitator rejected credentials (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    /// Network failure, timeout, or a non-success status other than 401/403.
    #[error("transport error: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Response body does not match the resource listing schema.
    #[error("could not decode resource listing: {0}")]
    Decode(#[from] serde_json::Error),
}

impl DiscoveryError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn from_reqwest(context: &str, e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            format!("{context}: request timed out")
        } else if e.is_connect() {
            format!("{context}: connection failed")
        } else {
            format!("{context}: {e}")
        };
        Self::Transport {
            status: e.status().map(|s| s.as_u16()),
            message,
            source: Some(e),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source: Some(e), .. } if e.is_timeout())
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Authentication { .. } => "authentication",
            Self::Transport { .. } => "transport",
            Self::Decode(_) => "decode",
        }
    }
}
