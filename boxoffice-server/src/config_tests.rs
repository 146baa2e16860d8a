//! Tests for configuration display and error messages.
//!
//! `from_env` itself is exercised indirectly; mutating the process
//! environment from parallel tests is not worth the flakiness.

use super::*;

fn sample_config() -> Config {
    Config {
        openai_api_key: "sk-secret".to_string(),
        tavily_api_key: "tvly-secret".to_string(),
        service_account_json: "{\"private_key\":\"secret\"}".to_string(),
        spreadsheet_id: "sheet-123".to_string(),
        sheets_range: None,
        model: DEFAULT_MODEL.to_string(),
        port: DEFAULT_PORT,
        openai_api_base: None,
        search_api_base: None,
        sheets_api_base: None,
    }
}

// ============================================================================
// Debug Redaction
// ============================================================================

#[test]
fn test_debug_redacts_credentials() {
    let output = format!("{:?}", sample_config());

    assert!(!output.contains("sk-secret"));
    assert!(!output.contains("tvly-secret"));
    assert!(!output.contains("private_key"));
    assert!(output.contains("[REDACTED]"));
}

#[test]
fn test_debug_shows_operational_fields() {
    let output = format!("{:?}", sample_config());

    assert!(output.contains("sheet-123"));
    assert!(output.contains("gpt-4o-mini"));
    assert!(output.contains("8080"));
}

// ============================================================================
// Error Messages
// ============================================================================

#[test]
fn test_missing_error_names_the_variable() {
    let error = ConfigError::Missing("OPENAI_API_KEY");
    assert_eq!(error.to_string(), "OPENAI_API_KEY environment variable not set");
}

#[test]
fn test_invalid_error_includes_the_value() {
    let error = ConfigError::Invalid {
        var: "PORT",
        message: "\"eighty\" is not a port number".to_string(),
    };
    assert_eq!(error.to_string(), "Invalid PORT: \"eighty\" is not a port number");
}

#[test]
fn test_defaults_match_production_values() {
    assert_eq!(DEFAULT_MODEL, "gpt-4o-mini");
    assert_eq!(DEFAULT_PORT, 8080);
}
