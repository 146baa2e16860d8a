//! # Boxoffice Core
//!
//! Domain types and pure logic for the boxoffice ticket-request broker.
//!
//! Everything in this crate is synchronous and free of I/O: conversation and
//! capture types, the lexical intent classifier, dollar-price extraction, the
//! spreadsheet row layout, and the tool schemas advertised to the completion
//! service. The HTTP clients and the request handler live in sibling crates
//! and consume these types.
//!
//! ## Quick Start
//!
//! ```
//! use boxoffice_core::{IntentClassifier, PriceExtractor, SearchResult, DEFAULT_PRICE_FLOOR};
//!
//! let classifier = IntentClassifier::new();
//! assert!(classifier.is_confirmation("sure, let's do it"));
//!
//! let extractor = PriceExtractor::new();
//! let results = vec![SearchResult {
//!     rank: 1,
//!     title: "Tickets from $45".to_string(),
//!     link: "https://example.com".to_string(),
//!     snippet: "parking $20".to_string(),
//! }];
//! assert_eq!(extractor.lowest_price(&results, DEFAULT_PRICE_FLOOR), Some(45));
//! ```
//!
//! ## Modules
//!
//! - [`types`] - conversation messages, ticket requests, search results, rows
//! - [`classifier`] - regex-based intent predicates over the last user message
//! - [`pricing`] - dollar-amount extraction with a noise floor and resale bias
//! - [`tool`] - the two tool declarations sent with every completion request
//! - [`prompt`] - the fixed system prompt

pub mod classifier;
pub mod pricing;
pub mod prompt;
pub mod tool;
pub mod types;

pub use classifier::{IntentClassifier, METRO_KEYWORDS, SUGGESTION_QUERY};
pub use pricing::{price_summary, PriceExtractor, DEFAULT_PRICE_FLOOR, RESALE_DOMAINS};
pub use prompt::SYSTEM_PROMPT;
pub use tool::{
    CaptureTicketInput, CaptureTicketTool, Tool, ToolDefinition, WebSearchInput, WebSearchTool,
};
pub use types::{
    last_user_text, row_timezone, ConversationMessage, Role, SearchResult, SpreadsheetRow,
    TicketRequest, ROW_TIMESTAMP_FORMAT,
};
