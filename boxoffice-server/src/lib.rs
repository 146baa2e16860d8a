//! # Boxoffice Server
//!
//! The HTTP surface of the boxoffice ticket-request broker: one chat route
//! that answers pre-flights, gates methods, and walks the capture /
//! confirmation / suggestion / completion decision order for POST bodies.
//!
//! The domain logic lives in `boxoffice-core`; the completion, search, and
//! spreadsheet clients live in `boxoffice-openai-sdk` and `boxoffice-tools`.
//! This crate wires them together behind an axum router and ships the
//! `boxoffice-server` binary.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use boxoffice_server::{AppState, BrokerRouter, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let port = config.port;
//!
//! let state = AppState::from_config(config)?;
//! let app = BrokerRouter::new(state).build();
//!
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod config;
pub mod error;
pub mod router;
pub mod state;

pub use chat::protocol::{ChatRequest, ChatResponse};
pub use config::{Config, ConfigError};
pub use error::{BuildError, ServerError, ServerResult};
pub use router::BrokerRouter;
pub use state::AppState;
