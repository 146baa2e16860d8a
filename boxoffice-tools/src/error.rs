//! Error types shared by the search and sheets clients

use thiserror::Error;

/// Errors from the external service clients.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Missing or invalid configuration (credentials, spreadsheet id, etc.)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-success response from the upstream service
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication or token-exchange failure
    #[error("Auth error: {0}")]
    Auth(String),

    /// Network error (timeout, connection failure)
    #[error("Network error: {0}")]
    Network(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;

impl ToolError {
    /// True when a retry could plausibly succeed.
    ///
    /// Transport failures and 408/429/5xx statuses qualify; auth,
    /// configuration, and 4xx request errors never do.
    pub fn is_retryable(&self) -> bool {
        match self {
            ToolError::Network(_) => true,
            ToolError::Api { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }

    /// Classify an HTTP transport error.
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ToolError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            ToolError::Network(format!("Connection failed: {}", err))
        } else {
            ToolError::Network(format!("Request failed: {}", err))
        }
    }
}

/// True for statuses worth retrying: 408, 429, and any 5xx.
pub fn is_retryable_status(status_code: u16) -> bool {
    matches!(status_code, 408 | 429 | 500..=599)
}
