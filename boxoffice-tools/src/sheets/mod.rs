//! Google Sheets append client.
//!
//! Captured ticket requests land as rows in a spreadsheet through the
//! `values:append` endpoint, authenticated as a service account via the
//! OAuth 2.0 JWT-bearer grant. Appending is the only write this crate
//! performs against the sheet.

mod auth;
mod client;

pub use auth::ServiceAccountKey;
pub use client::{SheetsClient, SheetsClientBuilder};
