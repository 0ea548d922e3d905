use serde_json::Value as JsonValue;

use crate::types::{HttpMethod, OperationDescriptor};

/// Outcome of one execution step.
///
/// `status` is `0` when the request never completed; in that case `error` is
/// set and `response` is absent.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TestExecutionResult {
    pub endpoint: String,
    pub method: HttpMethod,
    pub status: u16,
    /// Wall-clock duration in milliseconds.
    pub time: f64,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestExecutionResult {
    /// A request that got an HTTP response. Any status below 400 passes.
    pub fn completed(
        op: &OperationDescriptor,
        status: u16,
        time_ms: f64,
        response: Option<JsonValue>,
    ) -> Self {
        Self {
            endpoint: op.path.clone(),
            method: op.method,
            status,
            time: time_ms,
            passed: status < 400,
            response,
            error: None,
        }
    }

    /// A request that failed before a response arrived (DNS, refused, timeout).
    pub fn transport_failure(op: &OperationDescriptor, error: impl Into<String>) -> Self {
        Self {
            endpoint: op.path.clone(),
            method: op.method,
            status: 0,
            time: 0.0,
            passed: false,
            response: None,
            error: Some(error.into()),
        }
    }
}
