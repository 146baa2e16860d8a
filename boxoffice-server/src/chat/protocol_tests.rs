//! Wire-contract tests: request parsing and exact response shapes.

use super::*;
use boxoffice_core::Role;
use serde_json::{json, Value};

// ============================================================================
// Request Parsing
// ============================================================================

#[test]
fn test_empty_request_parses_with_defaults() {
    let request: ChatRequest = serde_json::from_str("{}").unwrap();

    assert!(!request.direct_capture);
    assert!(request.capture.is_none());
    assert!(request.messages.is_empty());
}

#[test]
fn test_direct_capture_request_parses() {
    let request: ChatRequest = serde_json::from_value(json!({
        "direct_capture": true,
        "capture": {"artist_or_event": "Hamilton", "ticket_qty": 3}
    }))
    .unwrap();

    assert!(request.direct_capture);
    let capture = request.capture.unwrap();
    assert_eq!(capture.artist_or_event, "Hamilton");
    assert_eq!(capture.ticket_qty, Some(3));
}

#[test]
fn test_conversation_request_parses() {
    let request: ChatRequest = serde_json::from_value(json!({
        "messages": [
            {"role": "assistant", "content": "Which event?"},
            {"role": "user", "content": "Hamilton in June"}
        ]
    }))
    .unwrap();

    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[1].role, Role::User);
    assert_eq!(request.messages[1].content, "Hamilton in June");
}

#[test]
fn test_unknown_fields_are_ignored() {
    let request: ChatRequest = serde_json::from_value(json!({
        "messages": [],
        "session_id": "abc-123"
    }))
    .unwrap();

    assert!(request.messages.is_empty());
}

// ============================================================================
// Response Shapes
// ============================================================================

#[test]
fn test_plain_message_serializes_alone() {
    let value = serde_json::to_value(ChatResponse::message("Hi there")).unwrap();
    assert_eq!(value, json!({"message": "Hi there"}));
}

#[test]
fn test_open_form_uses_camel_case() {
    let value = serde_json::to_value(ChatResponse::open_form("Opening the form")).unwrap();
    assert_eq!(value, json!({"message": "Opening the form", "openForm": true}));
}

#[test]
fn test_follow_up_emits_explicit_null_capture() {
    let value = serde_json::to_value(ChatResponse::follow_up("How many tickets?")).unwrap();

    let object = value.as_object().unwrap();
    assert!(object.contains_key("captured"));
    assert_eq!(object["captured"], Value::Null);
}

#[test]
fn test_captured_echoes_the_request() {
    let capture = TicketRequest {
        artist_or_event: "Hamilton".to_string(),
        ticket_qty: Some(2),
        ..Default::default()
    };
    let value = serde_json::to_value(ChatResponse::captured("Saved", capture)).unwrap();

    assert_eq!(
        value,
        json!({
            "message": "Saved",
            "captured": {"artist_or_event": "Hamilton", "ticket_qty": 2}
        })
    );
}

#[test]
fn test_results_are_included_verbatim() {
    let results = vec![SearchResult {
        rank: 1,
        title: "Tickets from $45".to_string(),
        link: "https://example.com/tickets".to_string(),
        snippet: "Resale tickets available".to_string(),
    }];
    let value = serde_json::to_value(ChatResponse::with_results("From $45", results)).unwrap();

    assert_eq!(value["results"][0]["rank"], 1);
    assert_eq!(value["results"][0]["title"], "Tickets from $45");
    assert!(value.get("captured").is_none());
}

#[test]
fn test_fallback_carries_the_note_without_results() {
    let value = serde_json::to_value(ChatResponse::fallback("From $60")).unwrap();

    assert_eq!(value, json!({"message": "From $60", "note": "fallback_search"}));
}
