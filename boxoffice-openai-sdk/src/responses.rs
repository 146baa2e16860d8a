//! Request and response types for the OpenAI Responses API.
//!
//! The response shape is heterogeneous: tool invocations can appear at any
//! nesting depth inside `output`/`content` wrappers, and free text can hide
//! under several alternate field names. The types here model that as an
//! untagged sum, and [`CompletionResponse`] exposes two walkers over it:
//! [`CompletionResponse::tool_calls`] and [`CompletionResponse::text`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Request types
// ============================================================================

/// One turn of conversation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMessage {
    /// "user", "assistant", or "system"
    pub role: String,
    pub content: String,
}

impl InputMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// A callable-tool declaration sent with a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParam {
    /// Always "function" for tools the caller handles itself.
    #[serde(rename = "type")]
    pub tool_type: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON schema for the tool's arguments.
    pub parameters: Value,
}

impl ToolParam {
    /// Declare a function tool.
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            tool_type: "function".to_string(),
            name: name.into(),
            description: Some(description.into()),
            parameters,
        }
    }
}

/// Parameters for creating a response.
///
/// # Example
///
/// ```
/// use boxoffice_openai_sdk::ResponseCreateParams;
///
/// let params = ResponseCreateParams::builder("gpt-4o-mini")
///     .instructions("You are a ticket concierge.")
///     .user("Two tickets to see Wilco, please")
///     .build();
///
/// assert_eq!(params.model, "gpt-4o-mini");
/// assert_eq!(params.input.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ResponseCreateParams {
    /// Model identifier, e.g. "gpt-4o-mini"
    pub model: String,

    /// Ordered conversation turns
    pub input: Vec<InputMessage>,

    /// System prompt. The Responses API takes this as a dedicated field
    /// rather than a system-role turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Callable-tool declarations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolParam>>,

    /// Tool selection policy; "auto" leaves the choice to the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl ResponseCreateParams {
    /// Create a builder for the given model.
    pub fn builder(model: impl Into<String>) -> ResponseCreateParamsBuilder {
        ResponseCreateParamsBuilder {
            model: model.into(),
            input: Vec::new(),
            instructions: None,
            tools: None,
            tool_choice: None,
            temperature: None,
            max_output_tokens: None,
        }
    }
}

/// Builder for [`ResponseCreateParams`].
#[derive(Debug, Clone)]
pub struct ResponseCreateParamsBuilder {
    model: String,
    input: Vec<InputMessage>,
    instructions: Option<String>,
    tools: Option<Vec<ToolParam>>,
    tool_choice: Option<String>,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
}

impl ResponseCreateParamsBuilder {
    /// Set the system prompt.
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Append one turn.
    pub fn message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.input.push(InputMessage::new(role, content));
        self
    }

    /// Append a user turn.
    ///
    /// ```
    /// use boxoffice_openai_sdk::ResponseCreateParams;
    ///
    /// let params = ResponseCreateParams::builder("gpt-4o-mini")
    ///     .user("hello")
    ///     .build();
    /// assert_eq!(params.input[0].role, "user");
    /// ```
    pub fn user(self, content: impl Into<String>) -> Self {
        self.message("user", content)
    }

    /// Append multiple turns, preserving order.
    pub fn messages(mut self, messages: impl IntoIterator<Item = InputMessage>) -> Self {
        self.input.extend(messages);
        self
    }

    /// Declare the callable tools.
    pub fn tools(mut self, tools: Vec<ToolParam>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Leave tool selection to the service.
    pub fn tool_choice_auto(mut self) -> Self {
        self.tool_choice = Some("auto".to_string());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn build(self) -> ResponseCreateParams {
        ResponseCreateParams {
            model: self.model,
            input: self.input,
            instructions: self.instructions,
            tools: self.tools,
            tool_choice: self.tool_choice,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

// ============================================================================
// Response types
// ============================================================================

/// A tool invocation returned by the service.
///
/// The Responses API encodes `arguments` as a string of JSON; other shapes
/// inline the object. [`ToolCallNode::arguments_value`] normalizes both.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallNode {
    #[serde(rename = "type")]
    pub node_type: Option<String>,

    pub id: Option<String>,

    /// Correlates a tool result with its invocation; unused by a
    /// single-round-trip caller but preserved for completeness.
    pub call_id: Option<String>,

    pub name: String,

    pub arguments: Option<Value>,
}

impl ToolCallNode {
    /// Arguments as a JSON value, decoding the string-encoded form.
    ///
    /// Malformed or absent arguments normalize to `Value::Null`; callers
    /// treat that the same as an empty payload.
    pub fn arguments_value(&self) -> Value {
        match &self.arguments {
            Some(Value::String(raw)) => serde_json::from_str(raw).unwrap_or(Value::Null),
            Some(value) => value.clone(),
            None => Value::Null,
        }
    }
}

/// A node carrying an `output` array of child nodes.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputWrapper {
    #[serde(rename = "type")]
    pub node_type: Option<String>,

    pub output: Vec<OutputNode>,

    /// Some shapes carry both wrappers on one node; both are walked.
    #[serde(default)]
    pub content: Vec<OutputNode>,
}

/// A node carrying a `content` array of child nodes (an assistant message).
#[derive(Debug, Clone, Deserialize)]
pub struct ContentWrapper {
    #[serde(rename = "type")]
    pub node_type: Option<String>,

    pub role: Option<String>,

    pub content: Vec<OutputNode>,
}

/// A leaf node carrying text under one of several known field names.
#[derive(Debug, Clone, Deserialize)]
pub struct TextNode {
    #[serde(rename = "type")]
    pub node_type: Option<String>,

    #[serde(alias = "output_text", alias = "content", alias = "value")]
    pub text: String,
}

/// One node of the response tree.
///
/// Untagged, so variant order is load-bearing: a tool call is any node with a
/// function `name`, wrappers are nodes with array children, text leaves come
/// next, and anything else (reasoning traces, built-in tool activity) parses
/// as [`OutputNode::Opaque`] rather than failing the whole response.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OutputNode {
    ToolCall(ToolCallNode),
    WithOutput(OutputWrapper),
    WithContent(ContentWrapper),
    Text(TextNode),
    Opaque(Value),
}

/// Token accounting for one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// A parsed response from the completion service.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    pub id: Option<String>,

    pub model: Option<String>,

    pub status: Option<String>,

    /// Pre-aggregated text, when the service supplies it.
    pub output_text: Option<String>,

    #[serde(default)]
    pub output: Vec<OutputNode>,

    #[serde(default)]
    pub content: Vec<OutputNode>,

    pub usage: Option<Usage>,
}

impl CompletionResponse {
    /// Every tool invocation in the response, at any nesting depth, in
    /// encounter order. The `output` tree is walked before the `content` tree.
    pub fn tool_calls(&self) -> Vec<&ToolCallNode> {
        let mut calls = Vec::new();
        collect_tool_calls(&self.output, &mut calls);
        collect_tool_calls(&self.content, &mut calls);
        calls
    }

    /// First tool call named `name`, if any.
    pub fn tool_call(&self, name: &str) -> Option<&ToolCallNode> {
        self.tool_calls().into_iter().find(|call| call.name == name)
    }

    /// The response's free text.
    ///
    /// Tries `output_text`, then the flattened `output` tree, then the
    /// flattened `content` tree, returning the first candidate that is
    /// non-empty after trimming. Empty string when the response carried no
    /// text at all.
    pub fn text(&self) -> String {
        if let Some(aggregated) = &self.output_text {
            let trimmed = aggregated.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }

        for tree in [&self.output, &self.content] {
            let mut flattened = String::new();
            flatten_text(tree, &mut flattened);
            let trimmed = flattened.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }

        String::new()
    }
}

fn collect_tool_calls<'a>(nodes: &'a [OutputNode], calls: &mut Vec<&'a ToolCallNode>) {
    for node in nodes {
        match node {
            OutputNode::ToolCall(call) => calls.push(call),
            OutputNode::WithOutput(wrapper) => {
                collect_tool_calls(&wrapper.output, calls);
                collect_tool_calls(&wrapper.content, calls);
            }
            OutputNode::WithContent(wrapper) => collect_tool_calls(&wrapper.content, calls),
            OutputNode::Text(_) | OutputNode::Opaque(_) => {}
        }
    }
}

fn flatten_text(nodes: &[OutputNode], into: &mut String) {
    for node in nodes {
        match node {
            OutputNode::Text(leaf) => into.push_str(&leaf.text),
            OutputNode::WithOutput(wrapper) => {
                flatten_text(&wrapper.output, into);
                flatten_text(&wrapper.content, into);
            }
            OutputNode::WithContent(wrapper) => flatten_text(&wrapper.content, into),
            OutputNode::ToolCall(_) | OutputNode::Opaque(_) => {}
        }
    }
}
