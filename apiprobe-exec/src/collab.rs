//! Boundary with the external test-data generator and failure advisor.
//!
//! Both collaborators return raw text that is expected to hold JSON. Nothing
//! they produce is trusted: malformed output becomes a [`CollaboratorError`]
//! and is reported, never retried and never allowed to abort a run.

use std::path::PathBuf;

use apiprobe_core::{
    parse_object_str, EndpointSummary, OperationDescriptor, TestData, TestExecutionResult,
};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::executor::request_body;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CollaboratorError {
    #[error("collaborator failed: {0}")]
    Failed(String),
    #[error("malformed collaborator output: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait TestDataGenerator: Send + Sync {
    /// Raw output keyed by operation key, each entry holding `body` and/or
    /// `parameters`.
    async fn generate(&self, endpoints: &[EndpointSummary]) -> Result<String, CollaboratorError>;
}

#[async_trait]
pub trait FailureAdvisor: Send + Sync {
    async fn diagnose(
        &self,
        endpoint: &EndpointSummary,
        request_body: &JsonValue,
        response_body: &JsonValue,
    ) -> Result<String, CollaboratorError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosisKind {
    InputIssue,
    ApiIssue,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Diagnosis {
    pub diagnosis: DiagnosisKind,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<JsonValue>,
}

/// Advisor verdict (or the reason there is none) for one failed step.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FailureReport {
    pub index: usize,
    pub endpoint: String,
    pub method: apiprobe_core::HttpMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<Diagnosis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Parse generator output into test data. Markdown code fences around the
/// JSON are tolerated.
pub fn parse_test_data(raw: &str) -> Result<TestData, CollaboratorError> {
    parse_object_str(strip_code_fence(raw)).map_err(|e| CollaboratorError::Malformed(e.to_string()))
}

pub fn parse_diagnosis(raw: &str) -> Result<Diagnosis, CollaboratorError> {
    serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| CollaboratorError::Malformed(e.to_string()))
}

pub async fn generate_test_data(
    generator: &dyn TestDataGenerator,
    operations: &[OperationDescriptor],
) -> Result<TestData, CollaboratorError> {
    let summaries: Vec<EndpointSummary> = operations.iter().map(|o| o.to_summary()).collect();
    let raw = generator.generate(&summaries).await?;
    parse_test_data(&raw)
}

/// Ask the advisor about every failed result. `operations` and `results` are
/// paired by position, as returned by a run.
pub async fn diagnose_failures(
    advisor: &dyn FailureAdvisor,
    operations: &[OperationDescriptor],
    results: &[TestExecutionResult],
    test_data: &TestData,
) -> Vec<FailureReport> {
    let mut reports = Vec::new();
    for (index, (op, result)) in operations.iter().zip(results).enumerate() {
        if result.passed {
            continue;
        }
        let body = if op.method.sends_body() {
            request_body(op, test_data)
        } else {
            JsonValue::Null
        };
        let response = match (&result.response, &result.error) {
            (Some(r), _) => r.clone(),
            (None, Some(e)) => JsonValue::String(e.clone()),
            (None, None) => JsonValue::Null,
        };

        let outcome = match advisor.diagnose(&op.to_summary(), &body, &response).await {
            Ok(raw) => parse_diagnosis(&raw),
            Err(e) => Err(e),
        };
        let (diagnosis, error) = match outcome {
            Ok(d) => (Some(d), None),
            Err(e) => {
                warn!(method = %op.method, path = %op.path, error = %e, "diagnosis unavailable");
                (None, Some(e.to_string()))
            }
        };
        reports.push(FailureReport {
            index,
            endpoint: result.endpoint.clone(),
            method: result.method,
            diagnosis,
            error,
        });
    }
    reports
}

/// Generator backed by a JSON or YAML file prepared ahead of time.
pub struct FileTestData {
    path: PathBuf,
}

impl FileTestData {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TestDataGenerator for FileTestData {
    async fn generate(&self, _endpoints: &[EndpointSummary]) -> Result<String, CollaboratorError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CollaboratorError::Failed(format!("read {}: {e}", self.path.display())))
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening fence line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
