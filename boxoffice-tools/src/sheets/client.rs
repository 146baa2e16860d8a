use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use boxoffice_core::SpreadsheetRow;
use serde::Deserialize;
use serde_json::json;

use crate::error::{Result, ToolError};
use crate::sheets::auth::{ServiceAccountKey, TokenSource};

/// Default Sheets API base URL
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

/// Default range rows are appended after (columns A through I)
pub const DEFAULT_RANGE: &str = "Sheet1!A:I";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for appending rows to a Google spreadsheet.
///
/// Clones share the underlying HTTP connection pool and the cached access
/// token.
#[derive(Clone)]
pub struct SheetsClient {
    client: reqwest::Client,
    token_source: Arc<TokenSource>,
    api_base: String,
    spreadsheet_id: String,
    range: String,
}

impl fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsClient")
            .field("api_base", &self.api_base)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("range", &self.range)
            .field("service_account", &"[REDACTED]")
            .finish()
    }
}

impl SheetsClient {
    /// Creates a client from a service-account key file and spreadsheet id.
    pub fn new(service_account_json: &str, spreadsheet_id: &str) -> Result<Self> {
        SheetsClient::builder()
            .service_account_json(service_account_json)
            .spreadsheet_id(spreadsheet_id)
            .build()
    }

    /// Creates a client from `GOOGLE_SERVICE_ACCOUNT_JSON` and
    /// `SHEETS_SPREADSHEET_ID`, with the range taken from `SHEETS_RANGE`
    /// when set.
    pub fn from_env() -> Result<Self> {
        let service_account_json = std::env::var("GOOGLE_SERVICE_ACCOUNT_JSON").map_err(|_| {
            ToolError::Configuration(
                "GOOGLE_SERVICE_ACCOUNT_JSON environment variable not set".to_string(),
            )
        })?;
        let spreadsheet_id = std::env::var("SHEETS_SPREADSHEET_ID").map_err(|_| {
            ToolError::Configuration(
                "SHEETS_SPREADSHEET_ID environment variable not set".to_string(),
            )
        })?;

        let mut builder = SheetsClient::builder()
            .service_account_json(service_account_json)
            .spreadsheet_id(spreadsheet_id);
        if let Ok(range) = std::env::var("SHEETS_RANGE") {
            builder = builder.range(range);
        }
        builder.build()
    }

    /// Returns a builder for configuring the client.
    pub fn builder() -> SheetsClientBuilder {
        SheetsClientBuilder::default()
    }

    /// Appends one row after the last data row of the configured range.
    ///
    /// Sends `valueInputOption=USER_ENTERED` so the sheet renders the
    /// timestamp and quantity the way a manual entry would. Appends are a
    /// mutation and are never retried; any failure surfaces to the caller.
    pub async fn append(&self, row: &SpreadsheetRow) -> Result<()> {
        let token = self.token_source.access_token(&self.client).await?;
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.api_base, self.spreadsheet_id, self.range
        );

        let response = self
            .client
            .post(&url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .bearer_auth(token)
            .json(&json!({ "values": [row.cells()] }))
            .send()
            .await
            .map_err(ToolError::from_reqwest_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(ToolError::from_reqwest_error)?;

        if !status.is_success() {
            return Err(ToolError::Api {
                status: status.as_u16(),
                message: error_message(&body, status.as_u16()),
            });
        }
        Ok(())
    }
}

/// Builder for [`SheetsClient`]
#[derive(Default)]
pub struct SheetsClientBuilder {
    service_account_json: Option<String>,
    spreadsheet_id: Option<String>,
    range: Option<String>,
    api_base: Option<String>,
    timeout: Option<Duration>,
}

impl SheetsClientBuilder {
    /// Sets the service-account key file contents (required).
    pub fn service_account_json(mut self, json: impl Into<String>) -> Self {
        self.service_account_json = Some(json.into());
        self
    }

    /// Sets the spreadsheet id from the sheet's URL (required).
    pub fn spreadsheet_id(mut self, id: impl Into<String>) -> Self {
        self.spreadsheet_id = Some(id.into());
        self
    }

    /// Sets the A1-notation range rows are appended after.
    pub fn range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Sets a custom API base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Sets the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client, validating the key file eagerly.
    pub fn build(self) -> Result<SheetsClient> {
        let service_account_json = self.service_account_json.ok_or_else(|| {
            ToolError::Configuration("Service account key is required".to_string())
        })?;
        let spreadsheet_id = self
            .spreadsheet_id
            .ok_or_else(|| ToolError::Configuration("Spreadsheet id is required".to_string()))?;

        let key = ServiceAccountKey::from_json(&service_account_json)?;
        let client = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| ToolError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(SheetsClient {
            client,
            token_source: Arc::new(TokenSource::new(key)),
            api_base: self
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            spreadsheet_id,
            range: self.range.unwrap_or_else(|| DEFAULT_RANGE.to_string()),
        })
    }
}

/// Best-effort extraction of `error.message` from a Sheets API error body.
/// Falls back to the raw body, or the bare status for empty bodies.
fn error_message(body: &str, status_code: u16) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }

    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error.message;
    }
    if body.trim().is_empty() {
        return format!("HTTP {}", status_code);
    }
    body.to_string()
}
