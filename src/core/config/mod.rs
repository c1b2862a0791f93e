use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;

pub const CONFIG_FILE_NAME: &str = "flowsync.toml";
pub const DEFAULT_PUSH_REF: &str = "git-sync";
pub const DEFAULT_WORKFLOWS_DIR: &str = "workflows";

/// Contents of `flowsync.toml`. Every section and key is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub workflows: WorkflowsConfig,

    #[serde(default)]
    pub logging: LoggingSection,
}

/// Workflow service connection. Usually supplied through the environment.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RemoteConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_ref: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkflowsConfig {
    /// Root of the workflows tree (default: ./workflows)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Schema override (default: bundled schema)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<PathBuf>,
}

/// `[logging]` section, interpreted by [`crate::logging::config::LoggingConfig`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingSection {
    pub default_level: Option<String>,
    pub enable_file: Option<bool>,
    pub log_dir: Option<PathBuf>,
    pub console_output: Option<String>,
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub workflows_dir: Option<PathBuf>,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub push_ref: Option<String>,
    pub schema: Option<PathBuf>,
}

/// Fully resolved settings for `flowsync sync`.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub api_url: Url,
    pub api_key: String,
    pub push_ref: String,
    pub workflows_dir: PathBuf,
    pub schema_path: Option<PathBuf>,
}

/// Fully resolved settings for `flowsync validate`.
#[derive(Debug, Clone)]
pub struct ValidateConfig {
    pub workflows_dir: PathBuf,
    pub schema_path: Option<PathBuf>,
}
