//! OpenAI API client

use crate::error::{ApiErrorResponse, OpenAIError};
use crate::responses::{CompletionResponse, ResponseCreateParams};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

/// Default API base URL
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// ============================================================================
// Client
// ============================================================================

/// OpenAI API client
#[derive(Clone)]
pub struct OpenAI {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl std::fmt::Debug for OpenAI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAI")
            .field("api_base", &self.api_base)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenAI {
    /// Create a new client with an explicit API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, OpenAIError> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new client from the OPENAI_API_KEY environment variable
    pub fn from_env() -> Result<Self, OpenAIError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            OpenAIError::Configuration("OPENAI_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }

    /// Create a builder for more advanced configuration
    pub fn builder() -> OpenAIBuilder {
        OpenAIBuilder::new()
    }

    /// Get a handle to the Responses API
    pub fn responses(&self) -> Responses<'_> {
        Responses { client: self }
    }
}

/// Builder for OpenAI client configuration
///
/// Create with [`OpenAI::builder()`] and configure using the fluent API.
/// The `api_key` is required - call [`Self::build()`] to create the client.
pub struct OpenAIBuilder {
    api_key: Option<String>,
    api_base: Option<String>,
    timeout: Option<Duration>,
}

impl OpenAIBuilder {
    fn new() -> Self {
        Self {
            api_key: None,
            api_base: None,
            timeout: None,
        }
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a custom API base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<OpenAI, OpenAIError> {
        let api_key = self
            .api_key
            .ok_or_else(|| OpenAIError::Configuration("API key is required".to_string()))?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                OpenAIError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(OpenAI {
            client,
            api_key,
            api_base: self
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }
}

// ============================================================================
// Responses API
// ============================================================================

/// Responses API handle
pub struct Responses<'a> {
    client: &'a OpenAI,
}

impl<'a> Responses<'a> {
    /// Create a response.
    ///
    /// Single shot: a non-success status or transport failure is returned to
    /// the caller as an error, never retried. The broker treats a completion
    /// failure as fatal for the whole request.
    pub async fn create(
        &self,
        params: ResponseCreateParams,
    ) -> Result<CompletionResponse, OpenAIError> {
        let url = format!("{}/responses", self.client.api_base);
        let headers = build_headers(&self.client.api_key)?;

        let response = self
            .client
            .client
            .post(&url)
            .headers(headers)
            .json(&params)
            .send()
            .await
            .map_err(OpenAIError::from_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            return response.json::<CompletionResponse>().await.map_err(|e| {
                OpenAIError::InvalidResponse(format!("Failed to parse response: {}", e))
            });
        }

        let status_code = status.as_u16();
        let error_body = response.text().await.unwrap_or_default();
        Err(parse_error_response(&error_body, status_code))
    }
}

fn build_headers(api_key: &str) -> Result<HeaderMap, OpenAIError> {
    let mut headers = HeaderMap::new();

    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| OpenAIError::Configuration(format!("Invalid API key: {}", e)))?,
    );

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(headers)
}

fn parse_error_response(body: &str, status_code: u16) -> OpenAIError {
    // Try to parse as API error response
    if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(body) {
        return OpenAIError::from_api_error(&error_response.error, status_code);
    }

    // Fallback to generic error based on status code
    let msg = if body.is_empty() {
        format!("HTTP {}", status_code)
    } else {
        body.to_string()
    };

    match status_code {
        401 => OpenAIError::Authentication(msg),
        429 => OpenAIError::RateLimited(msg),
        500..=599 => OpenAIError::ServiceUnavailable(msg),
        _ => OpenAIError::Other(msg),
    }
}
