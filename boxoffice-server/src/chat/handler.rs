//! The chat endpoint handler.
//!
//! One handler serves the whole route. It dispatches on the HTTP method
//! itself, then walks a fixed decision order for POST bodies:
//!
//! 1. direct form capture, persisted without a model call
//! 2. purchase confirmation, answered lexically
//! 3. suggestion request naming a metro area, answered with a canned search
//! 4. model completion, dispatching on whichever tool the model called
//! 5. lexical fallback search when the model ignored a search-like message
//! 6. the model's own text
//!
//! The first matching branch wins. Upstream failures are fatal for the
//! request; the client-side search retries are the only second chances.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::{Method, StatusCode};
use serde_json::Value;

use boxoffice_core::{
    last_user_text, price_summary, CaptureTicketTool, ConversationMessage, SpreadsheetRow,
    TicketRequest, Tool, WebSearchTool, SUGGESTION_QUERY, SYSTEM_PROMPT,
};
use boxoffice_openai_sdk::{InputMessage, ResponseCreateParams, ToolParam};

use crate::chat::protocol::{ChatRequest, ChatResponse};
use crate::error::{ServerError, ServerResult};
use crate::router::cors_headers;
use crate::state::AppState;

/// Acknowledgement for a direct form submission.
const DIRECT_CAPTURE_MESSAGE: &str = "Your ticket request has been saved. \
     Our concierge team will follow up with availability and pricing shortly.";

/// Reply when the user confirms they want to buy.
const OPEN_FORM_MESSAGE: &str = "Great! I've opened the request form. \
     Add your details there and we'll lock in your tickets.";

/// Acknowledgement after the model captures a request mid-conversation.
const CAPTURE_THANKS_MESSAGE: &str = "Thank you! I've recorded your ticket request. \
     Pop your contact details into the form and our team will confirm availability and pricing.";

/// Asked whenever a reply is needed but nothing usable was produced.
const FOLLOW_UP_QUESTION: &str =
    "How many tickets do you need, and what's your budget per ticket?";

/// Serves the chat route for every HTTP method.
pub async fn chat_handler(
    State(state): State<AppState>,
    method: Method,
    body: String,
) -> Response {
    if method == Method::OPTIONS {
        return (StatusCode::NO_CONTENT, cors_headers()).into_response();
    }
    if method != Method::POST {
        return ServerError::MethodNotAllowed.into_response();
    }

    match handle_post(&state, &body).await {
        Ok(reply) => (StatusCode::OK, cors_headers(), Json(reply)).into_response(),
        Err(error) => {
            log::error!("Chat request failed: {}", error);
            error.into_response()
        }
    }
}

async fn handle_post(state: &AppState, body: &str) -> ServerResult<ChatResponse> {
    let request: ChatRequest = serde_json::from_str(body)
        .map_err(|e| ServerError::Internal(format!("Unreadable request body: {}", e)))?;

    // A direct_capture flag without a payload falls through to the
    // conversational flow rather than erroring.
    if request.direct_capture {
        if let Some(capture) = request.capture {
            return direct_capture(state, capture).await;
        }
    }

    let last_user = last_user_text(&request.messages).unwrap_or_default();

    if state.classifier.is_confirmation(last_user) {
        return Ok(ChatResponse::open_form(OPEN_FORM_MESSAGE));
    }

    if state.classifier.wants_suggestions(last_user) {
        if let Some(metro) = state.classifier.mentioned_metro(last_user) {
            return suggestion_shortcut(state, metro).await;
        }
    }

    complete_and_dispatch(state, &request.messages, last_user).await
}

/// Persist a form-collected payload as-is, without consulting the model.
async fn direct_capture(state: &AppState, capture: TicketRequest) -> ServerResult<ChatResponse> {
    let row = SpreadsheetRow::from_request(&capture);
    state.sheets.append(&row).await?;
    Ok(ChatResponse::captured(DIRECT_CAPTURE_MESSAGE, capture))
}

/// Run the canned suggestion query scoped to a recognized metro area.
async fn suggestion_shortcut(state: &AppState, metro: &str) -> ServerResult<ChatResponse> {
    let results = state.search.search(SUGGESTION_QUERY, Some(metro), false).await?;
    let price = state.pricing.lowest_price(&results, state.price_floor);
    Ok(ChatResponse::with_results(price_summary(price), results))
}

/// Ask the model for a completion and dispatch on what came back.
async fn complete_and_dispatch(
    state: &AppState,
    messages: &[ConversationMessage],
    last_user: &str,
) -> ServerResult<ChatResponse> {
    let params = completion_params(&state.config.model, messages);
    let response = state.openai.responses().create(params).await?;

    if let Some(call) = response.tool_call(CaptureTicketTool.name()) {
        return match TicketRequest::from_tool_args(&call.arguments_value()) {
            Some(capture) => {
                let row = SpreadsheetRow::from_request(&capture);
                state.sheets.append(&row).await?;
                Ok(ChatResponse::captured(CAPTURE_THANKS_MESSAGE, capture))
            }
            // Unusable payload: ask for the essentials instead of erroring.
            None => Ok(ChatResponse::follow_up(FOLLOW_UP_QUESTION)),
        };
    }

    if let Some(call) = response.tool_call(WebSearchTool.name()) {
        let args = call.arguments_value();
        let query = args
            .get("q")
            .and_then(Value::as_str)
            .filter(|q| !q.trim().is_empty())
            .unwrap_or(last_user);
        let location = args.get("location").and_then(Value::as_str);

        // With a location we want the resale starting price; without one,
        // the cheapest plausible figure anywhere in the results.
        let resale_first = location.is_some();
        let results = state.search.search(query, location, resale_first).await?;
        let price = if resale_first {
            state.pricing.resale_starting_price(&results, state.price_floor)
        } else {
            state.pricing.lowest_price(&results, state.price_floor)
        };
        return Ok(ChatResponse::with_results(price_summary(price), results));
    }

    if state.classifier.looks_like_search_query(last_user) {
        log::warn!("Model returned no tool call for a search-like message; searching directly");
        let results = state.search.search(last_user, None, false).await?;
        let price = state.pricing.lowest_price(&results, state.price_floor);
        return Ok(ChatResponse::fallback(price_summary(price)));
    }

    let text = response.text();
    if text.trim().is_empty() {
        return Ok(ChatResponse::follow_up(FOLLOW_UP_QUESTION));
    }
    Ok(ChatResponse::message(text))
}

/// Build the completion request: system prompt, conversation, both tools.
fn completion_params(model: &str, messages: &[ConversationMessage]) -> ResponseCreateParams {
    let capture = CaptureTicketTool.definition();
    let search = WebSearchTool.definition();

    ResponseCreateParams::builder(model)
        .instructions(SYSTEM_PROMPT)
        .messages(
            messages
                .iter()
                .map(|m| InputMessage::new(m.role.to_string(), m.content.clone())),
        )
        .tools(vec![
            ToolParam::function(capture.name, capture.description, capture.parameters),
            ToolParam::function(search.name, search.description, search.parameters),
        ])
        .tool_choice_auto()
        .build()
}
