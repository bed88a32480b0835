//! Error types for the order backend collaborators.

use thiserror::Error;

/// Errors reported by the backend adapters.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The request could not be sent or the connection failed.
    #[error("Request to order backend failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status code.
    #[error("Order backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Failed to parse order backend response: {0}")]
    Parse(String),

    /// The adapter is misconfigured.
    #[error("Order backend configuration error: {0}")]
    Configuration(String),
}

impl BackendError {
    /// Whether retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Parse(_) | Self::Configuration(_) => false,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}
