use serde_json::Value as JsonValue;

use crate::http::HttpResponseParts;

/// Value stored in a result's `response` field.
///
/// JSON content types are parsed; anything that fails to parse, or is not
/// JSON, is kept as text.
pub fn response_value(resp: &HttpResponseParts) -> JsonValue {
    let text = String::from_utf8_lossy(&resp.body).into_owned();
    if resp.is_json() {
        if let Ok(v) = serde_json::from_str(&text) {
            return v;
        }
    }
    JsonValue::String(text)
}
