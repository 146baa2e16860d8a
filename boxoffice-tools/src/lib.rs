pub mod error;
pub mod search;
pub mod sheets;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export the client surface at the crate root for convenience
pub use error::{Result, ToolError};
pub use search::{RetryConfig, SearchClient, SearchClientBuilder};
pub use sheets::{ServiceAccountKey, SheetsClient, SheetsClientBuilder};
