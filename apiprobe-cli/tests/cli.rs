use assert_cmd::Command;
use httpmock::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn apiprobe() -> Command {
    Command::cargo_bin("apiprobe").unwrap()
}

fn write_spec(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

fn crud_spec(server: &str) -> String {
    json!({
        "openapi": "3.0.0",
        "info": {"title": "Trips", "version": "1.0"},
        "servers": [{"url": server}],
        "paths": {
            "/trips/{trip_id}": {
                "get": {"operationId": "getTrip", "parameters": [{"name": "trip_id", "in": "path"}]}
            },
            "/trips": {
                "post": {"operationId": "createTrip"}
            },
            "/auth/login": {
                "post": {"operationId": "login"}
            }
        }
    })
    .to_string()
}

#[test]
fn candidates_puts_spec_sibling_first() {
    let assert = apiprobe()
        .args(["candidates", "https://h.io/docs", "--format", "json"])
        .assert()
        .success();
    let v = stdout_json(assert.get_output());
    assert_eq!(v["candidates"][0], "https://h.io/openapi.json");
    assert_eq!(v["candidates"][1], "https://h.io/docs");
    assert_eq!(v["candidates"].as_array().unwrap().len(), 5);
}

#[test]
fn endpoints_lists_auth_first() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(
        &dir,
        "spec.yaml",
        r#"
openapi: 3.0.0
paths:
  /users:
    get:
      operationId: listUsers
    post:
      operationId: createUser
  /auth/login:
    post:
      operationId: login
"#,
    );

    let assert = apiprobe()
        .args(["endpoints", &spec, "--format", "json"])
        .assert()
        .success();
    let v = stdout_json(assert.get_output());
    let ids: Vec<&str> = v["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["operation_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["login", "createUser", "listUsers"]);
}

#[test]
fn unreadable_spec_is_invalid_input() {
    apiprobe()
        .args(["endpoints", "/definitely/not/here.json"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn run_passes_against_live_server() {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.method(POST).path("/auth/login");
        then.status(200).json_body(json!({"token": "t"}));
    });
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/trips")
            .header("x-key", "secret")
            .json_body(json!({"origin": "A"}));
        then.status(201).json_body(json!({"id": 9}));
    });
    let get = server.mock(|when, then| {
        when.method(GET).path("/trips/9");
        then.status(200).json_body(json!({"id": 9}));
    });

    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "spec.json", &crud_spec(&server.base_url()));
    let data = write_spec(
        &dir,
        "data.json",
        r#"{"createTrip": {"body": {"origin": "A"}}, "headers": {"X-Key": "secret"}}"#,
    );

    let assert = apiprobe()
        .args(["run", &spec, "--test-data", &data, "--set", "trip_id=9", "--format", "json"])
        .assert()
        .success();

    let v = stdout_json(assert.get_output());
    assert_eq!(v["summary"]["passed"], 3);
    assert_eq!(v["results"][0]["endpoint"], "/auth/login");
    assert_eq!(v["results"][1]["status"], 201);
    login.assert();
    create.assert();
    get.assert();
}

#[test]
fn failed_step_sets_run_failed_exit_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(json!({}));
    });
    server.mock(|when, then| {
        when.method(GET).path_contains("/trips/");
        then.status(404).body("not found");
    });

    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "spec.json", &crud_spec("http://unused.invalid"));

    let assert = apiprobe()
        .args(["run", &spec, "--base-url", &server.base_url(), "--format", "json"])
        .assert()
        .failure()
        .code(3);

    let v = stdout_json(assert.get_output());
    assert_eq!(v["summary"]["failed"], 1);
    assert_eq!(v["results"][2]["status"], 404);
    assert_eq!(v["results"][2]["response"], "not found");
}

#[test]
fn single_operation_by_key() {
    let server = MockServer::start();
    let get = server.mock(|when, then| {
        when.method(GET).path("/trips/4");
        then.status(200).json_body(json!({"id": 4}));
    });

    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "spec.json", &crud_spec(&server.base_url()));
    let vars = write_spec(&dir, "vars.yaml", "trip_id: 4\n");

    let assert = apiprobe()
        .args(["run", &spec, "--operation", "getTrip", "--variables", &vars, "--format", "json"])
        .assert()
        .success();

    let v = stdout_json(assert.get_output());
    assert_eq!(v["results"].as_array().unwrap().len(), 1);
    assert!(v.get("run_id").is_none());
    get.assert();

    apiprobe()
        .args(["run", &spec, "--operation", "deleteTrip"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn event_sinks_can_be_combined() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path_contains("/");
        then.status(200).json_body(json!({}));
    });

    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "spec.json", &crud_spec(&server.base_url()));

    let assert = apiprobe()
        .args(["run", &spec, "--set", "trip_id=1", "--events", "stdout,tracing"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let events: Vec<Value> = stdout
        .lines()
        .filter(|l| l.starts_with('{'))
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.first().unwrap()["type"], "run.started");
    assert_eq!(events.last().unwrap()["type"], "run.finished");
    assert_eq!(events.len(), 8);

    apiprobe()
        .args(["run", &spec, "--events", "stdout", "--format", "json"])
        .assert()
        .failure()
        .code(2);

    apiprobe()
        .args(["run", &spec, "--events", "syslog"])
        .assert()
        .failure()
        .code(4);
}
