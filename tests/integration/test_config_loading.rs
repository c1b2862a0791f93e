use flowsync::core::config::{ConfigLoader, ConfigOverrides};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn clear_flowsync_env() {
    for v in &[
        "N8N_API_URL",
        "N8N_API_KEY",
        "N8N_PUSH_REF",
        "WORKFLOWS_DIR",
        "FLOWSYNC_SCHEMA",
    ] {
        env::remove_var(v);
    }
}

#[test]
#[serial]
fn test_config_file_and_env_combine() {
    clear_flowsync_env();
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();

    fs::write(
        cwd.join("flowsync.toml"),
        r#"
[remote]
api_url = "https://n8n.internal/api/v1/"
push_ref = "release"

[workflows]
dir = "n8n/workflows"
schema = "n8n/schema.json"
"#,
    )
    .unwrap();
    env::set_var("N8N_API_KEY", "secret");

    let file = ConfigLoader::load_file(None, cwd).unwrap();
    let config = ConfigLoader::resolve_sync(&file, &ConfigOverrides::default(), cwd).unwrap();

    assert_eq!(config.api_url.as_str(), "https://n8n.internal/api/v1");
    assert_eq!(config.api_key, "secret");
    assert_eq!(config.push_ref, "release");
    assert_eq!(config.workflows_dir, cwd.join("n8n/workflows"));
    assert_eq!(config.schema_path, Some(cwd.join("n8n/schema.json")));
    clear_flowsync_env();
}

#[test]
#[serial]
fn test_env_overrides_config_file() {
    clear_flowsync_env();
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();
    fs::write(
        cwd.join("flowsync.toml"),
        "[remote]\napi_url = \"https://file.example\"\napi_key = \"file-key\"\n",
    )
    .unwrap();
    env::set_var("N8N_API_URL", "http://env.example:5678/api/v1");
    env::set_var("FLOWSYNC_SCHEMA", "/etc/flowsync/schema.json");

    let file = ConfigLoader::load_file(None, cwd).unwrap();
    let config = ConfigLoader::resolve_sync(&file, &ConfigOverrides::default(), cwd).unwrap();

    assert_eq!(config.api_url.host_str(), Some("env.example"));
    assert_eq!(config.api_key, "file-key");
    assert_eq!(config.push_ref, "git-sync");
    assert_eq!(
        config.schema_path,
        Some(PathBuf::from("/etc/flowsync/schema.json"))
    );
    clear_flowsync_env();
}

#[test]
#[serial]
fn test_non_http_url_is_rejected() {
    clear_flowsync_env();
    let temp_dir = TempDir::new().unwrap();
    let overrides = ConfigOverrides {
        api_url: Some("file:///tmp/n8n".to_string()),
        api_key: Some("k".to_string()),
        ..Default::default()
    };
    let err = ConfigLoader::resolve_sync(&Default::default(), &overrides, temp_dir.path())
        .unwrap_err();
    assert!(err.is_configuration());
}
