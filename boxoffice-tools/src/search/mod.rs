//! Ticket-oriented web search.
//!
//! The client augments queries toward ticket listings (appending "tickets",
//! the buyer's location, and optionally a resale-site filter) and retries
//! transient failures with exponential backoff. Price interpretation of the
//! returned snippets lives in `boxoffice_core::pricing`; this module only
//! fetches and normalizes results.

mod client;
mod retry;

pub use client::{SearchClient, SearchClientBuilder};
pub use retry::RetryConfig;
