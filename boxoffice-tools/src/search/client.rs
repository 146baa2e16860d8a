//! Web-search client.
//!
//! Wraps the Tavily search API with ticket-oriented query augmentation and a
//! bounded retry for transient failures. Search is the one upstream call that
//! is retried: it is read-only and idempotent, unlike the completion and
//! append calls.

use boxoffice_core::{SearchResult, RESALE_DOMAINS};
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::error::{Result, ToolError};
use crate::search::retry::RetryConfig;

/// Default API base URL
const DEFAULT_API_BASE: &str = "https://api.tavily.com";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of results requested per search
const DEFAULT_MAX_RESULTS: u8 = 5;

/// Web-search API client
#[derive(Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    max_results: u8,
    retry_config: RetryConfig,
    ticket_word: Regex,
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("api_base", &self.api_base)
            .field("api_key", &"[REDACTED]")
            .field("max_results", &self.max_results)
            .field("retry_config", &self.retry_config)
            .finish()
    }
}

impl SearchClient {
    /// Create a new client with an explicit API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new client from the TAVILY_API_KEY environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TAVILY_API_KEY").map_err(|_| {
            ToolError::Configuration("TAVILY_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }

    /// Create a builder for more advanced configuration
    pub fn builder() -> SearchClientBuilder {
        SearchClientBuilder::new()
    }

    /// Run a ticket-oriented search.
    ///
    /// The query is augmented before sending: the word "tickets" is appended
    /// unless already present, the location (when given) is appended, and
    /// `prefer_tickets` adds a disjunctive site filter for the preferred
    /// resale domains. Results come back ranked from 1, with absent fields
    /// defaulted to empty strings.
    ///
    /// Transient failures (transport errors, 408/429/5xx) are retried with
    /// exponential backoff up to the configured budget; anything else fails
    /// immediately.
    pub async fn search(
        &self,
        query: &str,
        location: Option<&str>,
        prefer_tickets: bool,
    ) -> Result<Vec<SearchResult>> {
        let final_query = self.build_query(query, location, prefer_tickets);
        let url = format!("{}/search", self.api_base);
        let body = json!({
            "query": final_query,
            "max_results": self.max_results,
        });

        let mut last_error: Option<ToolError> = None;

        for attempt in 0..=self.retry_config.max_retries {
            let result = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await;

            let error = match result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let raw = response.text().await.map_err(ToolError::from_reqwest_error)?;
                        let parsed: SearchResponse = serde_json::from_str(&raw)?;
                        return Ok(map_results(parsed));
                    }

                    ToolError::Api {
                        status: status.as_u16(),
                        message: response.text().await.unwrap_or_default(),
                    }
                }
                Err(e) => ToolError::from_reqwest_error(e),
            };

            if attempt < self.retry_config.max_retries && error.is_retryable() {
                let delay = self.retry_config.delay_for_attempt(attempt);
                log::debug!(
                    "Search attempt {} failed ({}), retrying in {:?}",
                    attempt + 1,
                    error,
                    delay
                );
                tokio::time::sleep(delay).await;
                last_error = Some(error);
                continue;
            }

            return Err(error);
        }

        Err(last_error
            .unwrap_or_else(|| ToolError::Configuration("Max retries exceeded".to_string())))
    }

    fn build_query(&self, query: &str, location: Option<&str>, prefer_tickets: bool) -> String {
        let mut parts = vec![query.trim().to_string()];

        if !self.ticket_word.is_match(query) {
            parts.push("tickets".to_string());
        }

        if let Some(location) = location {
            let location = location.trim();
            if !location.is_empty() {
                parts.push(location.to_string());
            }
        }

        if prefer_tickets {
            parts.push(resale_site_filter());
        }

        parts.join(" ")
    }
}

/// Disjunctive site filter for the preferred resale domains.
fn resale_site_filter() -> String {
    let sites: Vec<String> = RESALE_DOMAINS
        .iter()
        .map(|domain| format!("site:{}", domain))
        .collect();
    format!("({})", sites.join(" OR "))
}

fn map_results(response: SearchResponse) -> Vec<SearchResult> {
    response
        .results
        .into_iter()
        .enumerate()
        .map(|(i, raw)| SearchResult {
            rank: (i + 1) as u32,
            title: raw.title.unwrap_or_default(),
            link: raw.url.unwrap_or_default(),
            snippet: raw.content.unwrap_or_default(),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    title: Option<String>,
    url: Option<String>,
    content: Option<String>,
}

/// Builder for search client configuration
pub struct SearchClientBuilder {
    api_key: Option<String>,
    api_base: Option<String>,
    timeout: Option<Duration>,
    max_results: Option<u8>,
    retry_config: Option<RetryConfig>,
}

impl SearchClientBuilder {
    fn new() -> Self {
        Self {
            api_key: None,
            api_base: None,
            timeout: None,
            max_results: None,
            retry_config: None,
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

    /// Set the number of results requested per search
    pub fn max_results(mut self, max_results: u8) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Set custom retry configuration
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = Some(config);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<SearchClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| ToolError::Configuration("API key is required".to_string()))?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ToolError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let ticket_word = Regex::new(r"(?i)\b(?:tickets?|tix)\b").expect("ticket pattern compiles");

        Ok(SearchClient {
            client,
            api_key,
            api_base: self
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            max_results: self.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
            retry_config: self.retry_config.unwrap_or_default(),
            ticket_word,
        })
    }
}
