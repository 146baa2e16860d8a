use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Wire-ready description of a tool: what a completion request advertises.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema for the tool's arguments.
    pub parameters: Value,
}

/// Trait for tools the model may call during a conversation.
///
/// Tools define an input type with `#[derive(Deserialize, JsonSchema)]` so the
/// argument schema is generated from the Rust type. The broker never executes
/// tools generically; it pattern-matches on tool names when reading the model's
/// response. This trait exists to keep the advertised schema and the parsing
/// type in one place.
pub trait Tool: Send + Sync {
    /// The input type for this tool. Must implement `Deserialize` and `JsonSchema`.
    type Input: DeserializeOwned + JsonSchema;

    /// The name of the tool (e.g., "web_search")
    fn name(&self) -> &str;

    /// A description of what the tool does
    fn description(&self) -> &str;

    /// Get the JSON schema for this tool's input.
    ///
    /// This is automatically implemented using the `JsonSchema` derive on `Input`.
    /// The schema is generated at runtime from the type definition.
    fn input_schema(&self) -> Value {
        let schema = schemars::schema_for!(Self::Input);
        serde_json::to_value(schema).expect("Failed to serialize schema")
    }

    /// Bundle name, description, and schema for a completion request.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.input_schema(),
        }
    }
}

/// Arguments the model supplies when recording a ticket request.
///
/// No name, email, or phone field exists here. Identity details belong to the
/// web form, never the chat transcript.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CaptureTicketInput {
    /// Artist, band, team, or event name
    pub artist_or_event: String,
    /// Number of tickets wanted
    pub ticket_qty: i64,
    /// City where the buyer wants to attend
    #[serde(default)]
    pub city_or_residence: Option<String>,
    /// Requested date or date range, free-form
    #[serde(default)]
    pub date_or_date_range: Option<String>,
    /// Per-ticket budget, free-form
    #[serde(default)]
    pub budget: Option<String>,
    /// Anything else worth carrying onto the request
    #[serde(default)]
    pub notes: Option<String>,
}

/// Records a completed ticket request.
pub struct CaptureTicketTool;

impl Tool for CaptureTicketTool {
    type Input = CaptureTicketInput;

    fn name(&self) -> &str {
        "capture_ticket_request"
    }

    fn description(&self) -> &str {
        "Record the buyer's ticket request once the artist or event and the ticket \
         quantity are known. Leave optional fields out when the buyer has not \
         mentioned them."
    }
}

/// Arguments the model supplies when it wants live pricing.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WebSearchInput {
    /// Search query, typically the artist or event name
    pub q: String,
    /// City or metro area to localize the search
    #[serde(default)]
    pub location: Option<String>,
}

/// Looks up live ticket pricing and availability.
pub struct WebSearchTool;

impl Tool for WebSearchTool {
    type Input = WebSearchInput;

    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the live web for current ticket prices, deals, and availability. \
         Use when the buyer asks what tickets cost or what is happening nearby."
    }
}
