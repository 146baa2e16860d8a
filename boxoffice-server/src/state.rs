//! Shared application state for the chat endpoint.

use std::sync::Arc;

use boxoffice_core::{IntentClassifier, PriceExtractor, DEFAULT_PRICE_FLOOR};
use boxoffice_openai_sdk::OpenAI;
use boxoffice_tools::{SearchClient, SheetsClient};

use crate::config::Config;
use crate::error::BuildError;

/// Everything a request handler needs, cloned per request.
///
/// The clients hold their own connection pools and the classifier and price
/// extractor hold compiled patterns, so each is built once here and shared
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub openai: Arc<OpenAI>,
    pub search: Arc<SearchClient>,
    pub sheets: Arc<SheetsClient>,
    pub classifier: Arc<IntentClassifier>,
    pub pricing: Arc<PriceExtractor>,
    pub config: Arc<Config>,
    /// Dollar amounts below this are treated as fees, not ticket prices.
    pub price_floor: i64,
}

impl AppState {
    /// Builds every client from the configuration.
    ///
    /// Credentials are validated eagerly where possible; a bad service
    /// account key fails here rather than on the first append.
    pub fn from_config(config: Config) -> Result<Self, BuildError> {
        let mut openai = OpenAI::builder().api_key(config.openai_api_key.clone());
        if let Some(base) = &config.openai_api_base {
            openai = openai.api_base(base.clone());
        }

        let mut search = SearchClient::builder().api_key(config.tavily_api_key.clone());
        if let Some(base) = &config.search_api_base {
            search = search.api_base(base.clone());
        }

        let mut sheets = SheetsClient::builder()
            .service_account_json(config.service_account_json.clone())
            .spreadsheet_id(config.spreadsheet_id.clone());
        if let Some(range) = &config.sheets_range {
            sheets = sheets.range(range.clone());
        }
        if let Some(base) = &config.sheets_api_base {
            sheets = sheets.api_base(base.clone());
        }

        Ok(AppState {
            openai: Arc::new(openai.build()?),
            search: Arc::new(search.build()?),
            sheets: Arc::new(sheets.build()?),
            classifier: Arc::new(IntentClassifier::new()),
            pricing: Arc::new(PriceExtractor::new()),
            config: Arc::new(config),
            price_floor: DEFAULT_PRICE_FLOOR,
        })
    }
}
