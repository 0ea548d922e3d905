//! Turns a raw API description into the ordered list of operations a run walks.

mod refs;

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::types::{HttpMethod, OperationDescriptor, ParameterSpec};

pub use refs::RefError;

/// Walk `paths` in document order and emit one descriptor per supported
/// method, then order them with [`priority`].
///
/// The sort is stable, so operations with equal priority keep the order in
/// which the description lists them. Duplicate `method + path` pairs are kept.
pub fn model_operations(doc: &JsonValue) -> Vec<OperationDescriptor> {
    let mut out = Vec::new();
    let Some(paths) = doc.get("paths").and_then(|v| v.as_object()) else {
        return out;
    };

    for (path, item) in paths {
        let Some(item_obj) = item.as_object() else {
            debug!(path = %path, "skipping non-object path item");
            continue;
        };
        let shared = item_obj
            .get("parameters")
            .map(|p| collect_parameters(doc, path, p))
            .unwrap_or_default();

        for (key, operation) in item_obj {
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };
            let Some(op_obj) = operation.as_object() else {
                debug!(path = %path, method = %method, "skipping non-object operation");
                continue;
            };
            out.push(describe_operation(doc, path, method, op_obj, &shared));
        }
    }

    out.sort_by_key(priority);
    out
}

/// Coarse execution priority: auth/login first, then creates, reads, updates,
/// deletes. Lower runs earlier. Only method and path are inspected.
pub fn priority(op: &OperationDescriptor) -> u8 {
    let path = op.path.to_ascii_lowercase();
    if path.contains("auth") || path.contains("login") {
        return 1;
    }
    match op.method {
        HttpMethod::Post => 2,
        HttpMethod::Get => 3,
        HttpMethod::Put | HttpMethod::Patch => 4,
        HttpMethod::Delete => 5,
    }
}

fn describe_operation(
    doc: &JsonValue,
    path: &str,
    method: HttpMethod,
    op: &serde_json::Map<String, JsonValue>,
    shared: &[ParameterSpec],
) -> OperationDescriptor {
    let own = op
        .get("parameters")
        .map(|p| collect_parameters(doc, path, p))
        .unwrap_or_default();

    // Operation-level parameters override path-item ones with the same (name, in).
    let mut parameters: Vec<ParameterSpec> = shared
        .iter()
        .filter(|s| !own.iter().any(|o| o.name == s.name && o.location == s.location))
        .cloned()
        .collect();
    parameters.extend(own);

    OperationDescriptor {
        path: path.to_string(),
        method,
        operation_id: string_field(op, "operationId"),
        summary: string_field(op, "summary"),
        tags: op
            .get("tags")
            .and_then(|v| v.as_array())
            .map(|tags| {
                tags.iter()
                    .filter_map(|t| t.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
        parameters,
        request_body: op.get("requestBody").filter(|v| !v.is_null()).cloned(),
        responses: op
            .get("responses")
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default(),
        security: op
            .get("security")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default(),
    }
}

fn string_field(op: &serde_json::Map<String, JsonValue>, key: &str) -> Option<String> {
    op.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

fn collect_parameters(doc: &JsonValue, path: &str, parameters: &JsonValue) -> Vec<ParameterSpec> {
    let Some(arr) = parameters.as_array() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(arr.len());
    for p in arr {
        let resolved = match p.get("$ref").and_then(|v| v.as_str()) {
            Some(r) => match refs::resolve_ref(doc, r) {
                Ok(v) => v,
                Err(e) => {
                    debug!(path = %path, error = %e, "skipping parameter");
                    continue;
                }
            },
            None => p,
        };
        match resolved.as_object().and_then(ParameterSpec::from_raw) {
            Some(spec) => out.push(spec),
            None => debug!(path = %path, "skipping parameter without a valid name/in"),
        }
    }
    out
}
