//! Router construction for the chat endpoint.

use axum::routing::any;
use axum::Router;
use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use http::{HeaderName, HeaderValue};

use crate::chat::handler::chat_handler;
use crate::state::AppState;

/// Builds the broker's single-route router.
///
/// The route accepts every method and the handler dispatches on the method
/// itself, which keeps pre-flight responses and 405 bodies under the
/// handler's control instead of axum's defaults.
///
/// # Example
///
/// ```rust,no_run
/// use boxoffice_server::{AppState, BrokerRouter, Config};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let state = AppState::from_config(Config::from_env()?)?;
/// let app = BrokerRouter::new(state).build();
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub struct BrokerRouter {
    state: AppState,
}

impl BrokerRouter {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Build a router serving the chat endpoint at `/`.
    pub fn build(self) -> Router {
        Router::new()
            .route("/", any(chat_handler))
            .with_state(self.state)
    }

    /// Build a router with the chat endpoint nested under `prefix`, for
    /// embedding in a larger application.
    pub fn build_nested(self, prefix: impl Into<String>) -> Router {
        Router::new().nest(&prefix.into(), self.build())
    }
}

/// The permissive CORS headers attached to every response, including errors.
pub(crate) fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
        (
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ),
        (
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ),
    ]
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
