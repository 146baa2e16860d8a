//! End-to-end tests for the chat route against mock upstream services.
//!
//! One `MockServer` stands in for all three upstreams; the completion, search,
//! spreadsheet, and token endpoints live on distinct paths. Every test drives
//! the real router with `tower::ServiceExt::oneshot`, so the full stack runs:
//! method dispatch, body parsing, classification, client calls, price
//! extraction, and response serialization.

use axum::body::Body;
use axum::Router;
use http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use boxoffice_server::{AppState, BrokerRouter, Config};

// ============================================================================
// Harness
// ============================================================================

/// Build the app with every upstream pointed at the mock server.
fn test_app(upstream: &MockServer) -> Router {
    let config = Config {
        openai_api_key: "sk-test".to_string(),
        tavily_api_key: "tvly-test".to_string(),
        service_account_json: boxoffice_tools::test_utils::service_account_json(&format!(
            "{}/token",
            upstream.uri()
        )),
        spreadsheet_id: "sheet-test".to_string(),
        sheets_range: None,
        model: "gpt-4o-mini".to_string(),
        port: 8080,
        openai_api_base: Some(upstream.uri()),
        search_api_base: Some(upstream.uri()),
        sheets_api_base: Some(upstream.uri()),
    };
    BrokerRouter::new(AppState::from_config(config).expect("state should build")).build()
}

fn post_chat(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn user_message(content: &str) -> Value {
    json!({"messages": [{"role": "user", "content": content}]})
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A completion whose only output is assistant text.
fn text_completion(text: &str) -> Value {
    json!({
        "id": "resp_text",
        "model": "gpt-4o-mini",
        "status": "completed",
        "output": [{
            "type": "message",
            "role": "assistant",
            "content": [{"type": "output_text", "text": text}]
        }],
        "usage": {"input_tokens": 40, "output_tokens": 12, "total_tokens": 52}
    })
}

/// A completion whose only output is a single tool invocation.
fn tool_call_completion(name: &str, arguments: Value) -> Value {
    json!({
        "id": "resp_tool",
        "model": "gpt-4o-mini",
        "status": "completed",
        "output": [{
            "type": "function_call",
            "id": "fc_1",
            "call_id": "call_1",
            "name": name,
            "arguments": arguments
        }]
    })
}

fn search_response(results: Vec<Value>) -> Value {
    json!({"query": "q", "results": results})
}

async fn mount_completion(server: &MockServer, reply: Value) {
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounted in tests that must not reach the model.
async fn refuse_completion(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.test",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}

async fn mount_append(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-test/values/Sheet1!A:I:append"))
        .and(query_param("valueInputOption", "USER_ENTERED"))
        .and(header("authorization", "Bearer ya29.test"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"spreadsheetId": "sheet-test"})),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Every appended row the mock server saw, as cell vectors.
async fn appended_rows(server: &MockServer) -> Vec<Vec<String>> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| request.url.path().ends_with(":append"))
        .map(|request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            body["values"][0]
                .as_array()
                .unwrap()
                .iter()
                .map(|cell| cell.as_str().unwrap().to_string())
                .collect()
        })
        .collect()
}

/// The raw body of the single search request the mock server saw.
async fn search_request_body(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    let request = requests
        .iter()
        .find(|request| request.url.path() == "/search")
        .expect("a search request should have been made");
    String::from_utf8(request.body.clone()).unwrap()
}

// ============================================================================
// Direct Capture
// ============================================================================

#[tokio::test]
async fn test_direct_capture_appends_one_row_and_echoes_payload() {
    let upstream = MockServer::start().await;
    mount_token(&upstream).await;
    mount_append(&upstream, 1).await;
    refuse_completion(&upstream).await;

    let app = test_app(&upstream);
    let response = app
        .oneshot(post_chat(json!({
            "direct_capture": true,
            "capture": {
                "artist_or_event": "Hamilton",
                "ticket_qty": 3,
                "city_or_residence": "Chicago",
                "budget": "$150"
            }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let body = json_body(response).await;
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert_eq!(body["captured"]["artist_or_event"], "Hamilton");
    assert_eq!(body["captured"]["ticket_qty"], 3);

    let rows = appended_rows(&upstream).await;
    assert_eq!(rows.len(), 1);
    assert!(!rows[0][0].is_empty()); // timestamp cell
    assert_eq!(rows[0][1], "Hamilton");
    assert_eq!(rows[0][2], "3");
    assert_eq!(rows[0][6], "Chicago");
    assert_eq!(rows[0][7], "$150");
}

#[tokio::test]
async fn test_direct_capture_flag_without_payload_falls_through_to_the_model() {
    let upstream = MockServer::start().await;
    mount_completion(&upstream, text_completion("Which event would you like to see?")).await;

    let app = test_app(&upstream);
    let response = app
        .oneshot(post_chat(json!({
            "direct_capture": true,
            "messages": [{"role": "user", "content": "hello there"}]
        })))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["message"], "Which event would you like to see?");
}

// ============================================================================
// Lexical Shortcuts
// ============================================================================

#[tokio::test]
async fn test_confirmation_opens_the_form_without_a_model_call() {
    let upstream = MockServer::start().await;
    refuse_completion(&upstream).await;

    let app = test_app(&upstream);
    let response = app
        .oneshot(post_chat(user_message("Book it!")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["openForm"], true);
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert!(body.get("captured").is_none());
}

#[tokio::test]
async fn test_suggestion_with_metro_searches_without_a_model_call() {
    let upstream = MockServer::start().await;
    refuse_completion(&upstream).await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string_contains("popular concerts tickets chicago"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(vec![
            json!({
                "title": "Concerts in Chicago from $45",
                "url": "https://example.com/chicago-concerts",
                "content": "Upcoming shows this month"
            }),
        ])))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = test_app(&upstream);
    let response = app
        .oneshot(post_chat(user_message(
            "Any recommendations for a show in Chicago?",
        )))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("start around $45"));
    assert_eq!(body["results"][0]["rank"], 1);
    assert!(body.get("note").is_none());
}

// ============================================================================
// Model-Driven Capture
// ============================================================================

#[tokio::test]
async fn test_model_capture_call_appends_a_row() {
    let upstream = MockServer::start().await;
    mount_token(&upstream).await;
    mount_append(&upstream, 1).await;
    // The Responses API string-encodes tool arguments.
    mount_completion(
        &upstream,
        tool_call_completion(
            "capture_ticket_request",
            json!("{\"artist_or_event\":\"Hamilton\",\"ticket_qty\":2,\"budget\":\"$150\"}"),
        ),
    )
    .await;

    let app = test_app(&upstream);
    let response = app
        .oneshot(post_chat(user_message(
            "I need 2 tickets to Hamilton in June, my max is $150 each",
        )))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert_eq!(body["captured"]["artist_or_event"], "Hamilton");
    assert_eq!(body["captured"]["ticket_qty"], 2);

    let rows = appended_rows(&upstream).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], "Hamilton");
    assert_eq!(rows[0][2], "2");
    assert_eq!(rows[0][7], "$150");
}

#[tokio::test]
async fn test_inline_object_arguments_capture_identically() {
    let upstream = MockServer::start().await;
    mount_token(&upstream).await;
    mount_append(&upstream, 1).await;
    mount_completion(
        &upstream,
        tool_call_completion(
            "capture_ticket_request",
            json!({"artist_or_event": "Hamilton", "ticket_qty": 2}),
        ),
    )
    .await;

    let app = test_app(&upstream);
    let response = app
        .oneshot(post_chat(user_message("I need 2 tickets to Hamilton in June")))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["captured"]["artist_or_event"], "Hamilton");
    assert_eq!(body["captured"]["ticket_qty"], 2);
}

#[tokio::test]
async fn test_unusable_capture_payload_asks_a_follow_up() {
    let upstream = MockServer::start().await;
    mount_append(&upstream, 0).await;
    mount_completion(
        &upstream,
        tool_call_completion("capture_ticket_request", json!("{\"ticket_qty\":2}")),
    )
    .await;

    let app = test_app(&upstream);
    let response = app
        .oneshot(post_chat(user_message("I want tickets for something fun")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("How many tickets"));
    assert!(body.as_object().unwrap().contains_key("captured"));
    assert_eq!(body["captured"], Value::Null);
}

// ============================================================================
// Model-Driven Search
// ============================================================================

#[tokio::test]
async fn test_search_call_with_location_prefers_resale_starting_price() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string_contains("(site:stubhub.com OR site:vividseats.com)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(vec![
            json!({
                "title": "Eras Tour Tickets | StubHub",
                "url": "https://www.stubhub.com/eras-tour-chicago",
                "content": "Tickets from $89"
            }),
            json!({
                "title": "Eras Tour | Vivid Seats",
                "url": "https://www.vividseats.com/eras-tour",
                "content": "From $60"
            }),
        ])))
        .expect(1)
        .mount(&upstream)
        .await;
    mount_completion(
        &upstream,
        tool_call_completion(
            "web_search",
            json!("{\"q\":\"Eras Tour tickets\",\"location\":\"Chicago\"}"),
        ),
    )
    .await;

    let app = test_app(&upstream);
    let response = app
        .oneshot(post_chat(user_message(
            "How much are Eras Tour tickets in Chicago?",
        )))
        .await
        .unwrap();

    let body = json_body(response).await;
    // First resale result wins, even though a cheaper one follows.
    assert!(body["message"].as_str().unwrap().contains("start around $89"));
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_call_without_location_reports_the_lowest_price() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(vec![
            json!({
                "title": "Cubs Tickets from $120",
                "url": "https://www.mlb.com/cubs/tickets",
                "content": "Single game tickets on sale now"
            }),
            json!({
                "title": "Cheap Cubs Tickets",
                "url": "https://seatgeek.com/cubs-tickets",
                "content": "Prices start at $95"
            }),
        ])))
        .expect(1)
        .mount(&upstream)
        .await;
    mount_completion(
        &upstream,
        tool_call_completion("web_search", json!("{\"q\":\"Cubs tickets\"}")),
    )
    .await;

    let app = test_app(&upstream);
    let response = app
        .oneshot(post_chat(user_message("Find Cubs tickets for me")))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("start around $95"));

    let search_body = search_request_body(&upstream).await;
    assert!(!search_body.contains("site:"));
}

// ============================================================================
// Fallback and Text Replies
// ============================================================================

#[tokio::test]
async fn test_search_like_message_without_tool_call_falls_back_to_search() {
    let upstream = MockServer::start().await;
    mount_completion(&upstream, text_completion("Let me check on that for you.")).await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string_contains("Taylor Swift tickets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(vec![
            json!({
                "title": "Taylor Swift Tickets",
                "url": "https://example.com/taylor-swift",
                "content": "Resale from $230"
            }),
        ])))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = test_app(&upstream);
    let response = app
        .oneshot(post_chat(user_message(
            "How much do Taylor Swift tickets usually cost?",
        )))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["note"], "fallback_search");
    assert!(body["message"].as_str().unwrap().contains("start around $230"));
    assert!(body.get("results").is_none());
}

#[tokio::test]
async fn test_plain_text_reply_passes_through_verbatim() {
    let upstream = MockServer::start().await;
    let reply = "Which artist or event are you hoping to see, and in which city?";
    mount_completion(&upstream, text_completion(reply)).await;

    let app = test_app(&upstream);
    let response = app
        .oneshot(post_chat(user_message("hello there")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let body = json_body(response).await;
    assert_eq!(body, json!({"message": reply}));
}

#[tokio::test]
async fn test_empty_model_reply_substitutes_the_follow_up() {
    let upstream = MockServer::start().await;
    mount_completion(
        &upstream,
        json!({"id": "resp_empty", "status": "completed", "output": []}),
    )
    .await;

    let app = test_app(&upstream);
    let response = app
        .oneshot(post_chat(user_message("hmm")))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("How many tickets"));
    assert_eq!(body["captured"], Value::Null);
}

// ============================================================================
// Upstream Failures
// ============================================================================

#[tokio::test]
async fn test_completion_failure_is_a_500_with_cors() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"message": "overloaded", "type": "server_error"}
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = test_app(&upstream);
    let response = app
        .oneshot(post_chat(user_message("Tell me about Hamilton")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let body = json_body(response).await;
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_rejection_is_fatal_and_not_retried() {
    let upstream = MockServer::start().await;
    mount_completion(
        &upstream,
        tool_call_completion("web_search", json!("{\"q\":\"Cubs tickets\"}")),
    )
    .await;
    // 400 is not retryable; exactly one search attempt.
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid query"
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = test_app(&upstream);
    let response = app
        .oneshot(post_chat(user_message("Find Cubs tickets for me")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("Tool error"));
}
