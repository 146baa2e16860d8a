//! The chat endpoint: wire protocol and request handling.

pub mod handler;
pub mod protocol;
