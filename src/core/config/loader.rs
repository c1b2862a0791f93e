use super::{
    ConfigOverrides, ConfigValidator, FileConfig, SyncConfig, ValidateConfig, CONFIG_FILE_NAME,
    DEFAULT_WORKFLOWS_DIR,
};
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the config file named on the command line, or `flowsync.toml` from `cwd`.
    /// An explicitly named file must exist; the implicit one is optional.
    pub fn load_file(explicit: Option<&Path>, cwd: &Path) -> Result<FileConfig, AppError> {
        match explicit {
            Some(path) => {
                let path = absolutize(path, cwd);
                Self::load_from_file(&path)?.ok_or_else(|| {
                    AppError::new(
                        ErrorCategory::ConfigurationError,
                        format!("Config file {} does not exist", path.display()),
                    )
                })
            }
            None => Ok(Self::load_from_file(&cwd.join(CONFIG_FILE_NAME))?.unwrap_or_default()),
        }
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<FileConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigurationError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
        })?;

        Ok(Some(config))
    }

    /// Resolve everything `sync` needs. Missing URL or key is a configuration error.
    pub fn resolve_sync(
        file: &FileConfig,
        overrides: &ConfigOverrides,
        cwd: &Path,
    ) -> Result<SyncConfig, AppError> {
        let api_url = pick(
            overrides.api_url.clone(),
            "N8N_API_URL",
            file.remote.api_url.clone(),
        );
        let api_key = pick(
            overrides.api_key.clone(),
            "N8N_API_KEY",
            file.remote.api_key.clone(),
        );
        let push_ref = pick(
            overrides.push_ref.clone(),
            "N8N_PUSH_REF",
            file.remote.push_ref.clone(),
        );

        let api_url = ConfigValidator::api_url(api_url)?;
        let api_key = ConfigValidator::api_key(api_key)?;
        let validate = Self::resolve_validate(file, overrides, cwd);

        Ok(SyncConfig {
            api_url,
            api_key,
            push_ref: ConfigValidator::push_ref(push_ref),
            workflows_dir: validate.workflows_dir,
            schema_path: validate.schema_path,
        })
    }

    /// Resolve the workflows root and schema; needs no credentials.
    pub fn resolve_validate(
        file: &FileConfig,
        overrides: &ConfigOverrides,
        cwd: &Path,
    ) -> ValidateConfig {
        let workflows_dir = overrides
            .workflows_dir
            .clone()
            .or_else(|| non_empty_env("WORKFLOWS_DIR").map(PathBuf::from))
            .or_else(|| file.workflows.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKFLOWS_DIR));
        let schema_path = overrides
            .schema
            .clone()
            .or_else(|| non_empty_env("FLOWSYNC_SCHEMA").map(PathBuf::from))
            .or_else(|| file.workflows.schema.clone());

        ValidateConfig {
            workflows_dir: absolutize(&workflows_dir, cwd),
            schema_path: schema_path.map(|path| absolutize(&path, cwd)),
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "N8N_API_URL - Base URL of the n8n public API, e.g. https://n8n.example.com/api/v1 (required for sync)",
            "N8N_API_KEY - API key sent as X-N8N-API-KEY (required for sync)",
            "N8N_PUSH_REF - Push reference attached to every write (default: git-sync)",
            "WORKFLOWS_DIR - Root of the workflows tree (default: ./workflows)",
            "FLOWSYNC_SCHEMA - Schema file replacing the bundled workflow schema",
            "RUST_LOG - Tracing filter directive (overridden by --log-level)",
        ]
    }
}

/// Command line first, then environment, then config file. Blank values are skipped.
fn pick(cli: Option<String>, var: &str, file: Option<String>) -> Option<String> {
    cli.filter(|value| !value.trim().is_empty())
        .or_else(|| non_empty_env(var))
        .or_else(|| file.filter(|value| !value.trim().is_empty()))
}

fn non_empty_env(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
