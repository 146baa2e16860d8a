//! Wire types for the chat endpoint.
//!
//! One request shape and one response shape cover every branch the handler
//! can take. Optional response fields are omitted from the JSON entirely
//! unless the branch that produced the response set them, so a plain reply
//! serializes as nothing but `{"message": ...}`.

use boxoffice_core::{ConversationMessage, SearchResult, TicketRequest};
use serde::{Deserialize, Serialize};

/// A chat turn, or a direct form submission when `direct_capture` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Persist `capture` without consulting the model.
    #[serde(default)]
    pub direct_capture: bool,

    /// Form-collected payload for the direct-capture path.
    #[serde(default)]
    pub capture: Option<TicketRequest>,

    /// The full conversation so far, oldest turn first.
    #[serde(default)]
    pub messages: Vec<ConversationMessage>,
}

/// The single response shape for the chat route.
///
/// `captured` is a double `Option`: `None` omits the field, `Some(None)`
/// emits an explicit `"captured": null` (a follow-up question after a failed
/// capture), and `Some(Some(_))` echoes the persisted request back.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured: Option<Option<TicketRequest>>,

    #[serde(rename = "openForm", skip_serializing_if = "Option::is_none")]
    pub open_form: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<SearchResult>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ChatResponse {
    fn new(message: impl Into<String>) -> Self {
        ChatResponse {
            message: message.into(),
            captured: None,
            open_form: None,
            results: None,
            note: None,
        }
    }

    /// A plain reply with no auxiliary fields.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(message)
    }

    /// Echo a persisted capture back to the caller.
    pub fn captured(message: impl Into<String>, capture: TicketRequest) -> Self {
        ChatResponse {
            captured: Some(Some(capture)),
            ..Self::new(message)
        }
    }

    /// A follow-up question with an explicit `captured: null`.
    pub fn follow_up(message: impl Into<String>) -> Self {
        ChatResponse {
            captured: Some(None),
            ..Self::new(message)
        }
    }

    /// Tell the client to open the request form.
    pub fn open_form(message: impl Into<String>) -> Self {
        ChatResponse {
            open_form: Some(true),
            ..Self::new(message)
        }
    }

    /// A price summary along with the results that produced it.
    pub fn with_results(message: impl Into<String>, results: Vec<SearchResult>) -> Self {
        ChatResponse {
            results: Some(results),
            ..Self::new(message)
        }
    }

    /// A price summary produced by the lexical fallback search. Carries a
    /// note instead of the result list.
    pub fn fallback(message: impl Into<String>) -> Self {
        ChatResponse {
            note: Some("fallback_search".to_string()),
            ..Self::new(message)
        }
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
