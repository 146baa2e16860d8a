//! Minimal OpenAI client for boxoffice
//!
//! This crate provides a lightweight, focused client for the OpenAI Responses
//! API: one request in, one parsed response out, with tool declarations and
//! tolerant response-tree walking. No streaming, no retries; the broker treats
//! a completion failure as fatal for the request that triggered it.
//!
//! # Quick Start
//!
//! ```no_run
//! // Requires OPENAI_API_KEY environment variable
//! use boxoffice_openai_sdk::{OpenAI, ResponseCreateParams};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAI::from_env()?;
//!
//! let params = ResponseCreateParams::builder("gpt-4o-mini")
//!     .instructions("You are a ticket concierge.")
//!     .user("Two tickets to see Wilco, please")
//!     .build();
//!
//! let response = client.responses().create(params).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```
//!
//! # Tool Use
//!
//! Declare callable tools and inspect the invocations the model returns:
//!
//! ```no_run
//! // Requires OPENAI_API_KEY environment variable
//! use boxoffice_openai_sdk::{OpenAI, ResponseCreateParams, ToolParam};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAI::from_env()?;
//!
//! let tool = ToolParam::function(
//!     "web_search",
//!     "Search the live web for ticket prices",
//!     json!({
//!         "type": "object",
//!         "properties": {"q": {"type": "string"}},
//!         "required": ["q"]
//!     }),
//! );
//!
//! let params = ResponseCreateParams::builder("gpt-4o-mini")
//!     .user("How much are Wilco tickets in Chicago?")
//!     .tools(vec![tool])
//!     .tool_choice_auto()
//!     .build();
//!
//! let response = client.responses().create(params).await?;
//!
//! for call in response.tool_calls() {
//!     println!("Tool {} called with {}", call.name, call.arguments_value());
//! }
//! # Ok(())
//! # }
//! ```

// Domain modules
mod client;
mod error;
pub mod responses;

// Client types
pub use client::{OpenAI, OpenAIBuilder, Responses};

// Error types
pub use error::{ApiError, ApiErrorResponse, OpenAIError};

// Responses - request types
pub use responses::{
    InputMessage, ResponseCreateParams, ResponseCreateParamsBuilder, ToolParam,
};

// Responses - response types
pub use responses::{
    CompletionResponse, ContentWrapper, OutputNode, OutputWrapper, TextNode, ToolCallNode, Usage,
};
