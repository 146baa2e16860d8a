//! Error types for the boxoffice server.

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;

use boxoffice_openai_sdk::OpenAIError;
use boxoffice_tools::ToolError;

use crate::config::ConfigError;
use crate::router::cors_headers;

/// Errors raised while constructing the application state.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Completion client error: {0}")]
    Completion(#[from] OpenAIError),

    #[error("Tool client error: {0}")]
    Tool(#[from] ToolError),
}

/// Errors that terminate a chat request.
///
/// Upstream failures are fatal for the request that triggered them; nothing
/// here retries or degrades. The classifier shortcuts cannot fail, so every
/// variant except [`ServerError::MethodNotAllowed`] maps to a 500.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The route accepts only POST requests and OPTIONS pre-flights.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Completion service failure, including transport errors.
    #[error("Completion error: {0}")]
    Completion(#[from] OpenAIError),

    /// Search or spreadsheet failure, after the client's own retries.
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// Anything else, including unreadable request bodies.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({ "error": self.to_string() }));
        (status, cors_headers(), body).into_response()
    }
}

/// Result type alias for request handling.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
