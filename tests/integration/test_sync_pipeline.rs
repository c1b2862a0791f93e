use flowsync::core::locator::DocumentLocator;
use flowsync::core::pipeline::run_sync;
use flowsync::core::remote::N8nClient;
use flowsync::core::reporter::DocumentOutcome;
use flowsync::core::sync_engine::SyncOutcome;
use flowsync::core::types::RunStatus;
use flowsync::core::validator::WorkflowValidator;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_workflow(root: &Path, dir: &str, value: &Value) {
    let directory = root.join(dir);
    fs::create_dir_all(&directory).unwrap();
    fs::write(
        directory.join("workflow.json"),
        serde_json::to_string_pretty(value).unwrap(),
    )
    .unwrap();
}

fn client(server: &MockServer) -> N8nClient {
    let base = Url::parse(&format!("{}/api/v1", server.uri())).unwrap();
    N8nClient::new(&base, "test-key", "git-sync").unwrap()
}

#[tokio::test]
async fn test_creates_and_updates_sanitized_documents() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workflows"))
        .and(header("X-N8N-API-KEY", "test-key"))
        .and(header("push-ref", "git-sync"))
        .and(body_json(json!({
            "name": "A",
            "nodes": [],
            "connections": {},
            "settings": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "wf_new", "name": "A"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/workflows/wf_1"))
        .and(body_json(json!({
            "id": "wf_1",
            "name": "B",
            "nodes": [{"name": "Start", "type": "n8n-nodes-base.start"}],
            "connections": {},
            "settings": {"timezone": "UTC"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "wf_1", "name": "B"})))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    write_workflow(
        temp.path(),
        "a",
        &json!({"name": "A", "nodes": [], "connections": {}, "active": true}),
    );
    write_workflow(
        temp.path(),
        "b",
        &json!({
            "id": "wf_1",
            "name": "B",
            "nodes": [{"name": "Start", "type": "n8n-nodes-base.start"}],
            "connections": {},
            "settings": {"timezone": "UTC"},
            "versionId": "3f1c",
            "updatedAt": "2024-01-01T00:00:00.000Z",
            "pinData": {},
            "meta": {"instanceId": "abc"}
        }),
    );

    let validator = WorkflowValidator::bundled().unwrap();
    let outcome = run_sync(&DocumentLocator::new(temp.path()), &validator, &client(&server))
        .await
        .unwrap();

    assert_eq!(outcome.status(), RunStatus::Succeeded { processed: 2 });
    assert_eq!(
        outcome.records[0].outcome,
        DocumentOutcome::Synced(SyncOutcome::Created {
            id: Some("wf_new".to_string())
        })
    );
    assert_eq!(
        outcome.records[1].outcome,
        DocumentOutcome::Synced(SyncOutcome::Updated {
            id: "wf_1".to_string()
        })
    );
}

#[tokio::test]
async fn test_unknown_id_falls_back_to_create() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/workflows/wf_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workflows"))
        .and(body_json(json!({
            "name": "Orphan",
            "nodes": [],
            "connections": {},
            "settings": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "wf_fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    write_workflow(
        temp.path(),
        "orphan",
        &json!({"id": "wf_missing", "name": "Orphan", "nodes": [], "connections": {}}),
    );

    let validator = WorkflowValidator::bundled().unwrap();
    let outcome = run_sync(&DocumentLocator::new(temp.path()), &validator, &client(&server))
        .await
        .unwrap();

    assert!(outcome.status().is_success());
    assert_eq!(
        outcome.records[0].outcome,
        DocumentOutcome::Synced(SyncOutcome::CreatedViaFallback {
            stale_id: "wf_missing".to_string(),
            id: Some("wf_fresh".to_string()),
        })
    );
}

#[tokio::test]
async fn test_remote_rejection_is_recorded_and_run_continues() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/workflows/wf_bad"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"code": "invalid", "message": "request/body must have nodes"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workflows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "wf_ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    write_workflow(
        temp.path(),
        "a-bad",
        &json!({"id": "wf_bad", "name": "Bad", "nodes": [], "connections": {}}),
    );
    write_workflow(
        temp.path(),
        "b-good",
        &json!({"name": "Good", "nodes": [], "connections": {}}),
    );

    let validator = WorkflowValidator::bundled().unwrap();
    let outcome = run_sync(&DocumentLocator::new(temp.path()), &validator, &client(&server))
        .await
        .unwrap();

    assert_eq!(outcome.status(), RunStatus::Failed { failures: 1 });
    let failure = outcome.failures().next().unwrap();
    assert_eq!(failure.path, Path::new("a-bad/workflow.json"));
    assert_eq!(failure.outcome.category(), Some("remote"));
    let rendered = failure.outcome.to_string();
    assert!(rendered.contains("Status: 400"));
    assert!(rendered.contains("request/body must have nodes"));
}

#[tokio::test]
async fn test_empty_tree_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("notes")).unwrap();
    fs::write(temp.path().join("notes/README.md"), "not a workflow").unwrap();

    let validator = WorkflowValidator::bundled().unwrap();
    let outcome = run_sync(&DocumentLocator::new(temp.path()), &validator, &client(&server))
        .await
        .unwrap();
    assert_eq!(outcome.status(), RunStatus::NoDocuments);
}
