//! Core data types for the ticket-request broker.
//!
//! Everything here is a transient, request-scoped value: conversations arrive
//! from the caller on every request, captures are serialized into a
//! spreadsheet row and discarded, and nothing is retained between requests.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Timestamp format written into column A of the spreadsheet.
pub const ROW_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fixed zone for row timestamps (US Eastern standard offset).
pub fn row_timezone() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).expect("offset is in range")
}

// ============================================================================
// Conversation
// ============================================================================

/// Role of a conversation participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::System => write!(f, "system"),
        }
    }
}

/// A single turn in the caller-supplied conversation.
///
/// The sequence is ordered and never mutated by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Content of the most recent user message, if any.
pub fn last_user_text(messages: &[ConversationMessage]) -> Option<&str> {
    messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
}

// ============================================================================
// Ticket requests
// ============================================================================

/// A capture payload: the structured fields of a ticket request.
///
/// Constructed either from a direct form submission or from a model-issued
/// tool call. Parsing is deliberately lenient: `ticket_qty` accepts a JSON
/// integer or a numeric string, and anything else normalizes to `None` so the
/// spreadsheet cell can fall back to an empty string.
///
/// `name`/`email`/`phone` only ever arrive via the direct-form path; the chat
/// flow never collects them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketRequest {
    #[serde(default)]
    pub artist_or_event: String,

    #[serde(default, deserialize_with = "de_lenient_qty")]
    pub ticket_qty: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_or_residence: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_or_date_range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl TicketRequest {
    /// Parse a model-supplied tool-call payload.
    ///
    /// Returns `None` when the payload is not an object or lacks a usable
    /// `artist_or_event`. An unparseable quantity does not reject the capture;
    /// the row simply carries an empty quantity cell.
    pub fn from_tool_args(args: &Value) -> Option<Self> {
        let request: TicketRequest = serde_json::from_value(args.clone()).ok()?;
        request.is_capturable().then_some(request)
    }

    /// True when the request names an artist or event.
    pub fn is_capturable(&self) -> bool {
        !self.artist_or_event.trim().is_empty()
    }

    /// Spreadsheet cell for the quantity: a formatted integer or empty string.
    pub fn qty_cell(&self) -> String {
        self.ticket_qty.map(|q| q.to_string()).unwrap_or_default()
    }
}

fn de_lenient_qty<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(lenient_qty))
}

fn lenient_qty(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

// ============================================================================
// Search results
// ============================================================================

/// One ranked result from the web-search service.
///
/// Absent upstream fields default to empty strings; `rank` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub rank: u32,
    pub title: String,
    pub link: String,
    pub snippet: String,
}

// ============================================================================
// Spreadsheet rows
// ============================================================================

/// The fixed 9-column row appended to the spreadsheet.
///
/// Column order and count are invariant: timestamp, artist_or_event,
/// ticket_qty, name, email, phone, city_or_residence, budget, notes
/// (columns A through I). Missing fields render as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetRow {
    pub timestamp: String,
    pub artist_or_event: String,
    pub ticket_qty: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city_or_residence: String,
    pub budget: String,
    pub notes: String,
}

impl SpreadsheetRow {
    /// Build a row stamped with the current time in the fixed row zone.
    pub fn from_request(request: &TicketRequest) -> Self {
        Self::from_request_at(request, Utc::now().with_timezone(&row_timezone()))
    }

    /// Build a row with an explicit timestamp. Deterministic.
    pub fn from_request_at(request: &TicketRequest, at: DateTime<FixedOffset>) -> Self {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            timestamp: at.format(ROW_TIMESTAMP_FORMAT).to_string(),
            artist_or_event: request.artist_or_event.clone(),
            ticket_qty: request.qty_cell(),
            name: field(&request.name),
            email: field(&request.email),
            phone: field(&request.phone),
            city_or_residence: field(&request.city_or_residence),
            budget: field(&request.budget),
            notes: field(&request.notes),
        }
    }

    /// The ordered cell values for the append call.
    pub fn cells(&self) -> [String; 9] {
        [
            self.timestamp.clone(),
            self.artist_or_event.clone(),
            self.ticket_qty.clone(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.city_or_residence.clone(),
            self.budget.clone(),
            self.notes.clone(),
        ]
    }
}
