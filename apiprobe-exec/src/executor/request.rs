use std::collections::BTreeMap;

use apiprobe_core::{value_to_string, OperationDescriptor, RuntimeContext, TestData, Variables};
use serde_json::Value as JsonValue;

use crate::http::HttpRequestParts;

/// Build the concrete request for one step.
///
/// Only the URL goes through placeholder resolution; the body is sent as
/// found in the test data.
pub fn build_request(
    op: &OperationDescriptor,
    base_url: &str,
    variables: &Variables,
    test_data: &TestData,
) -> HttpRequestParts {
    let context = RuntimeContext::merge(variables, test_data);
    let url = context.resolve(&format!("{base_url}{}", op.path));
    let url = context.resolve_path_params(&url, op.path_parameters().map(|p| p.name.as_str()));

    let mut headers = select_headers(variables, test_data);

    let body = if op.method.sends_body() {
        if !headers.keys().any(|k| k.eq_ignore_ascii_case("content-type")) {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        request_body(op, test_data).to_string().into_bytes()
    } else {
        Vec::new()
    };

    HttpRequestParts {
        method: op.method.as_str().to_string(),
        url,
        headers,
        body,
    }
}

/// `test_data[key]["body"]`, or `{}` when the operation has no entry.
pub fn request_body(op: &OperationDescriptor, test_data: &TestData) -> JsonValue {
    test_data
        .get(op.key().as_ref())
        .and_then(|entry| entry.get("body"))
        .filter(|b| !b.is_null())
        .cloned()
        .unwrap_or_else(|| JsonValue::Object(serde_json::Map::new()))
}

/// Headers come from `variables.headers` when it is a non-empty object,
/// otherwise from `test_data.headers`.
fn select_headers(variables: &Variables, test_data: &TestData) -> BTreeMap<String, String> {
    let from = |source: Option<&JsonValue>| {
        source
            .and_then(|v| v.as_object())
            .filter(|m| !m.is_empty())
            .map(|m| {
                m.iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k.clone(), value_to_string(v)))
                    .collect::<BTreeMap<_, _>>()
            })
    };
    from(variables.get("headers"))
        .or_else(|| from(test_data.get("headers")))
        .unwrap_or_default()
}
