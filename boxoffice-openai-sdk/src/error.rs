//! Error types for the OpenAI SDK

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// API Error Types
// ============================================================================

/// API error response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// API error details
///
/// `type` and `code` are both optional on the wire; classification prefers the
/// HTTP status and falls back to `code`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
}

// ============================================================================
// SDK Error Types
// ============================================================================

/// Errors that can occur when using the OpenAI API
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Authentication failed (invalid API key)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limited or out of quota
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Service unavailable or overloaded
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Invalid request (bad parameters, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid response (failed to parse API response)
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error (missing API key, etc.)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl OpenAIError {
    /// Classify an API error response into an appropriate error variant
    pub fn from_api_error(error: &ApiError, status_code: u16) -> Self {
        let msg = error.message.clone();
        let code = error.code.as_deref().unwrap_or("");

        match (status_code, code) {
            (401, _) | (403, _) | (_, "invalid_api_key") => OpenAIError::Authentication(msg),
            (429, _) | (_, "rate_limit_exceeded") | (_, "insufficient_quota") => {
                OpenAIError::RateLimited(msg)
            }
            (500..=599, _) | (_, "server_error") => OpenAIError::ServiceUnavailable(msg),
            (400, _) | (404, _) | (422, _) => OpenAIError::InvalidRequest(msg),
            _ => OpenAIError::Other(msg),
        }
    }

    /// Classify an HTTP error into an appropriate error variant
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OpenAIError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            OpenAIError::Network(format!("Connection failed: {}", err))
        } else if err.is_request() {
            OpenAIError::Network(format!("Request failed: {}", err))
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                401 => OpenAIError::Authentication(err.to_string()),
                429 => OpenAIError::RateLimited(err.to_string()),
                500..=599 => OpenAIError::ServiceUnavailable(err.to_string()),
                _ => OpenAIError::Other(err.to_string()),
            }
        } else {
            OpenAIError::Other(err.to_string())
        }
    }
}
