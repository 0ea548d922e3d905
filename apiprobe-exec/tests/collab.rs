use apiprobe_core::{
    EndpointSummary, HttpMethod, OperationDescriptor, TestData, TestExecutionResult,
};
use apiprobe_exec::collab::{
    diagnose_failures, generate_test_data, parse_diagnosis, parse_test_data, CollaboratorError,
    DiagnosisKind, FailureAdvisor, FileTestData, TestDataGenerator,
};
use async_trait::async_trait;
use serde_json::{json, Value};

// Returns a canned answer per path.
struct CannedAdvisor;

#[async_trait]
impl FailureAdvisor for CannedAdvisor {
    async fn diagnose(
        &self,
        endpoint: &EndpointSummary,
        request_body: &Value,
        _response_body: &Value,
    ) -> Result<String, CollaboratorError> {
        match endpoint.path.as_str() {
            "/users" => Ok(format!(
                "```json\n{}\n```",
                json!({
                    "diagnosis": "INPUT_ISSUE",
                    "explanation": "email is required",
                    "suggested_fix": {"email": "a@b.c", "was": request_body}
                })
            )),
            "/trips" => Ok("I think the server is broken.".to_string()),
            _ => Err(CollaboratorError::Failed("quota exceeded".to_string())),
        }
    }
}

struct GarbageGenerator;

#[async_trait]
impl TestDataGenerator for GarbageGenerator {
    async fn generate(&self, endpoints: &[EndpointSummary]) -> Result<String, CollaboratorError> {
        Ok(format!("{} endpoints, sorry no JSON", endpoints.len()))
    }
}

#[test]
fn diagnosis_parses_both_kinds() {
    let raw = r#"{"diagnosis": "API_ISSUE", "explanation": "500 on valid input"}"#;
    let d = parse_diagnosis(raw).unwrap();
    assert_eq!(d.diagnosis, DiagnosisKind::ApiIssue);
    assert!(d.suggested_fix.is_none());

    let err = parse_diagnosis(r#"{"diagnosis": "MAYBE", "explanation": ""}"#).unwrap_err();
    assert!(matches!(err, CollaboratorError::Malformed(_)));
}

#[test]
fn test_data_must_be_an_object() {
    let fenced = "```json\n{\"createUser\": {\"body\": {\"name\": \"x\"}}}\n```";
    let data = parse_test_data(fenced).unwrap();
    assert_eq!(data["createUser"]["body"]["name"], "x");
    assert!(matches!(parse_test_data("[1,2,3]"), Err(CollaboratorError::Malformed(_))));
    assert!(matches!(parse_test_data(""), Err(CollaboratorError::Malformed(_))));
}

#[tokio::test]
async fn failures_are_reported_per_result_without_aborting() {
    let ops = vec![
        OperationDescriptor::new(HttpMethod::Post, "/users"),
        OperationDescriptor::new(HttpMethod::Get, "/health"),
        OperationDescriptor::new(HttpMethod::Post, "/trips"),
        OperationDescriptor::new(HttpMethod::Delete, "/drivers/1"),
    ];
    let results = vec![
        TestExecutionResult::completed(&ops[0], 422, 3.0, Some(json!({"detail": "email"}))),
        TestExecutionResult::completed(&ops[1], 200, 1.0, Some(json!("ok"))),
        TestExecutionResult::completed(&ops[2], 500, 2.0, None),
        TestExecutionResult::transport_failure(&ops[3], "connection refused"),
    ];
    let data: TestData = json!({"POST_/users": {"body": {"name": "n"}}})
        .as_object()
        .cloned()
        .unwrap();

    let reports = diagnose_failures(&CannedAdvisor, &ops, &results, &data).await;

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].index, 0);
    let d = reports[0].diagnosis.as_ref().unwrap();
    assert_eq!(d.diagnosis, DiagnosisKind::InputIssue);
    assert_eq!(d.suggested_fix.as_ref().unwrap()["was"], json!({"name": "n"}));

    assert_eq!(reports[1].index, 2);
    assert!(reports[1].diagnosis.is_none());
    assert!(reports[1].error.as_ref().unwrap().starts_with("malformed"));

    assert_eq!(reports[2].index, 3);
    assert_eq!(reports[2].error.as_deref(), Some("collaborator failed: quota exceeded"));
}

#[tokio::test]
async fn generated_test_data_is_validated() {
    let ops = vec![OperationDescriptor::new(HttpMethod::Get, "/a")];
    let err = generate_test_data(&GarbageGenerator, &ops).await.unwrap_err();
    assert!(matches!(err, CollaboratorError::Malformed(_)));
}

#[tokio::test]
async fn file_backed_generator_accepts_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.yaml");
    std::fs::write(&path, "createUser:\n  body:\n    name: Asha\nheaders:\n  X-Key: k\n").unwrap();

    let data = generate_test_data(&FileTestData::new(&path), &[]).await.unwrap();
    assert_eq!(data["createUser"]["body"]["name"], "Asha");
    assert_eq!(data["headers"]["X-Key"], "k");

    let missing = generate_test_data(&FileTestData::new(dir.path().join("nope.json")), &[])
        .await
        .unwrap_err();
    assert!(matches!(missing, CollaboratorError::Failed(_)));
}
