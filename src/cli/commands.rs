use crate::cli::args::{NormalizeSchemaArgs, SyncArgs, ValidateArgs};
use crate::core::config::{ConfigLoader, FileConfig};
use crate::core::locator::DocumentLocator;
use crate::core::pipeline::{run_sync, run_validation};
use crate::core::remote::N8nClient;
use crate::core::schema_normalizer::normalize_schema_file;
use crate::core::types::RunStatus;
use crate::core::validator::WorkflowValidator;
use crate::Result;
use anyhow::Context;
use std::path::Path;

pub async fn sync(args: SyncArgs, file_config: &FileConfig, cwd: &Path) -> Result<RunStatus> {
    let config = ConfigLoader::resolve_sync(file_config, &args.overrides(), cwd)?;
    let validator = WorkflowValidator::load(config.schema_path.as_deref())?;
    let client = N8nClient::new(&config.api_url, &config.api_key, &config.push_ref)?;
    tracing::debug!(
        push_ref = client.push_ref(),
        "syncing {} to {}",
        config.workflows_dir.display(),
        config.api_url
    );

    let locator = DocumentLocator::new(&config.workflows_dir);
    let outcome = run_sync(&locator, &validator, &client)
        .await
        .with_context(|| format!("failed to sync {}", config.workflows_dir.display()))?;
    outcome.log_summary();
    Ok(outcome.status())
}

pub fn validate(args: ValidateArgs, file_config: &FileConfig, cwd: &Path) -> Result<RunStatus> {
    let config = ConfigLoader::resolve_validate(file_config, &args.overrides(), cwd);
    let validator = WorkflowValidator::load(config.schema_path.as_deref())?;

    let locator = DocumentLocator::new(&config.workflows_dir);
    let outcome = run_validation(&locator, &validator)
        .with_context(|| format!("failed to validate {}", config.workflows_dir.display()))?;
    outcome.log_summary();
    Ok(outcome.status())
}

pub fn normalize_schema(args: NormalizeSchemaArgs, cwd: &Path) -> Result<RunStatus> {
    let path = if args.file.is_absolute() {
        args.file
    } else {
        cwd.join(args.file)
    };
    let summary = normalize_schema_file(&path)?;
    for (old, new) in &summary.renamed {
        tracing::info!("{} -> {}", old, new);
    }
    Ok(RunStatus::Succeeded { processed: 1 })
}
