use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A `flowsync` invocation isolated from the caller's environment.
fn flowsync(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("flowsync").unwrap();
    cmd.current_dir(cwd);
    for var in [
        "N8N_API_URL",
        "N8N_API_KEY",
        "N8N_PUSH_REF",
        "WORKFLOWS_DIR",
        "FLOWSYNC_SCHEMA",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_workflow(root: &Path, dir: &str, body: serde_json::Value) {
    let directory = root.join(dir);
    fs::create_dir_all(&directory).unwrap();
    fs::write(directory.join("workflow.json"), body.to_string()).unwrap();
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    flowsync(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("normalize-schema"));
}

#[test]
fn test_version_command() {
    let temp = TempDir::new().unwrap();
    flowsync(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_usage_error_keeps_clap_exit_code() {
    let temp = TempDir::new().unwrap();
    flowsync(temp.path()).arg("publish").assert().code(2);
}

#[test]
fn test_sync_without_api_url_fails() {
    let temp = TempDir::new().unwrap();
    flowsync(temp.path())
        .arg("sync")
        .env("N8N_API_KEY", "key")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("N8N_API_URL is required"));
}

#[test]
fn test_sync_without_api_key_fails() {
    let temp = TempDir::new().unwrap();
    flowsync(temp.path())
        .arg("sync")
        .env("N8N_API_URL", "http://127.0.0.1:9/api/v1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("N8N_API_KEY is required"));
}

#[test]
fn test_validate_empty_tree_succeeds() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("workflows")).unwrap();
    flowsync(temp.path())
        .arg("validate")
        .assert()
        .success()
        .stderr(predicate::str::contains("No workflow.json files found"));
}

#[test]
fn test_validate_passes_clean_tree() {
    let temp = TempDir::new().unwrap();
    write_workflow(
        &temp.path().join("workflows"),
        "billing",
        json!({"name": "Billing", "nodes": [], "connections": {}, "active": false}),
    );
    flowsync(temp.path())
        .arg("validate")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "All workflow JSON files passed validation",
        ));
}

#[test]
fn test_validate_rejects_active_workflows() {
    let temp = TempDir::new().unwrap();
    write_workflow(
        temp.path(),
        "live",
        json!({"name": "Live", "nodes": [], "connections": {}, "active": true}),
    );
    flowsync(temp.path())
        .arg("validate")
        .arg(".")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Found workflow issues:"))
        .stderr(predicate::str::contains("live/workflow.json"))
        .stderr(predicate::str::contains("active=true"));
}

#[test]
fn test_validate_reads_workflows_dir_from_env() {
    let temp = TempDir::new().unwrap();
    write_workflow(&temp.path().join("flows"), "broken", json!({"name": "Broken"}));
    flowsync(temp.path())
        .arg("validate")
        .env("WORKFLOWS_DIR", "flows")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Schema validation failed"));
}

#[test]
fn test_missing_explicit_config_file_fails() {
    let temp = TempDir::new().unwrap();
    flowsync(temp.path())
        .args(["validate", "--config", "absent.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn test_normalize_schema_rewrites_file() {
    let temp = TempDir::new().unwrap();
    let schema = temp.path().join("schema.json");
    fs::write(
        &schema,
        r##"{"definitions":{"Record<string,any>":{}},"$ref":"#/definitions/Record%3Cstring%2Cany%3E"}"##,
    )
    .unwrap();

    flowsync(temp.path())
        .args(["normalize-schema", "schema.json"])
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&schema).unwrap()).unwrap();
    assert_eq!(written["$ref"], json!("#/definitions/Record_string_any_"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sync_pushes_tree_to_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workflows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "wf_new"})))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    write_workflow(
        &temp.path().join("workflows"),
        "hello",
        json!({"name": "Hello", "nodes": [], "connections": {}}),
    );

    flowsync(temp.path())
        .arg("sync")
        .env("N8N_API_URL", format!("{}/api/v1/", server.uri()))
        .env("N8N_API_KEY", "key")
        .assert()
        .success()
        .stderr(predicate::str::contains("POST /workflows (Hello)"));
}

#[test]
fn test_sync_reports_unreachable_service() {
    let temp = TempDir::new().unwrap();
    write_workflow(
        &temp.path().join("workflows"),
        "hello",
        json!({"name": "Hello", "nodes": [], "connections": {}}),
    );

    flowsync(temp.path())
        .arg("sync")
        .env("N8N_API_URL", "http://127.0.0.1:9/api/v1")
        .env("N8N_API_KEY", "key")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to import hello/workflow.json"));
}
