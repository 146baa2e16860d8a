//! Process configuration read from the environment.
//!
//! Four variables are required and three are optional. Service base URLs are
//! deliberately not environment-driven: they exist as plain fields so tests
//! can point the clients at local mock servers, and [`Config::from_env`]
//! always leaves them `None` (each client then uses its production default).

use std::fmt;

/// Model used when `OPENAI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;

/// Everything the server needs to build its clients and bind its listener.
#[derive(Clone)]
pub struct Config {
    /// Completion service API key (`OPENAI_API_KEY`).
    pub openai_api_key: String,
    /// Search service API key (`TAVILY_API_KEY`).
    pub tavily_api_key: String,
    /// Full service-account key file contents (`GOOGLE_SERVICE_ACCOUNT_JSON`).
    pub service_account_json: String,
    /// Target spreadsheet (`SHEETS_SPREADSHEET_ID`).
    pub spreadsheet_id: String,
    /// Append range override (`SHEETS_RANGE`); the client defaults to
    /// `Sheet1!A:I` when unset.
    pub sheets_range: Option<String>,
    /// Completion model (`OPENAI_MODEL`).
    pub model: String,
    /// Listen port (`PORT`).
    pub port: u16,
    /// Completion service base URL override, for tests.
    pub openai_api_base: Option<String>,
    /// Search service base URL override, for tests.
    pub search_api_base: Option<String>,
    /// Spreadsheet service base URL override, for tests.
    pub sheets_api_base: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// The error names the first missing required variable so operators can
    /// fix deployments without reading source.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                message: format!("{:?} is not a port number", raw),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Config {
            openai_api_key: require("OPENAI_API_KEY")?,
            tavily_api_key: require("TAVILY_API_KEY")?,
            service_account_json: require("GOOGLE_SERVICE_ACCOUNT_JSON")?,
            spreadsheet_id: require("SHEETS_SPREADSHEET_ID")?,
            sheets_range: std::env::var("SHEETS_RANGE").ok(),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            port,
            openai_api_base: None,
            search_api_base: None,
            sheets_api_base: None,
        })
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::Missing(var))
}

// Keep credentials out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &"[REDACTED]")
            .field("tavily_api_key", &"[REDACTED]")
            .field("service_account_json", &"[REDACTED]")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheets_range", &self.sheets_range)
            .field("model", &self.model)
            .field("port", &self.port)
            .field("openai_api_base", &self.openai_api_base)
            .field("search_api_base", &self.search_api_base)
            .field("sheets_api_base", &self.sheets_api_base)
            .finish()
    }
}

/// Errors raised while reading the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is absent.
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    /// A variable is present but unparseable.
    #[error("Invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
