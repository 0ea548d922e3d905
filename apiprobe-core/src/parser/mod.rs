use serde_json::Value as JsonValue;

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

/// Parse an API description (or any context file) into a JSON value.
///
/// YAML input is converted to the equivalent JSON tree so downstream code only
/// ever walks `serde_json::Value`.
pub fn parse_document_str(input: &str, format: DocumentFormat) -> Result<JsonValue, ParseError> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(input)?),
        DocumentFormat::Yaml => Ok(serde_yaml::from_str(input)?),
        DocumentFormat::Auto => parse_document_auto(input),
    }
}

/// Like [`parse_document_str`] with auto-detection, but the root must be an object.
pub fn parse_object_str(input: &str) -> Result<serde_json::Map<String, JsonValue>, ParseError> {
    match parse_document_str(input, DocumentFormat::Auto)? {
        JsonValue::Object(map) => Ok(map),
        _ => Err(ParseError::NotAnObject),
    }
}

fn parse_document_auto(input: &str) -> Result<JsonValue, ParseError> {
    // JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str(input) {
            Ok(v) => Ok(v),
            Err(e) => serde_yaml::from_str(input).map_err(|_| ParseError::Json(e)),
        };
    }

    match serde_yaml::from_str(input) {
        Ok(v) => Ok(v),
        Err(e) => serde_json::from_str(input).map_err(|_| ParseError::Yaml(e)),
    }
}
