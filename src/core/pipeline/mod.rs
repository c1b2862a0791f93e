//! The two entry points over a workflows tree: push to the service, or check only.
//!
//! Documents are handled one at a time in locator order. A failing document is
//! recorded and the run moves on; only locator errors abort.

use crate::core::document::WorkflowDocument;
use crate::core::error::AppError;
use crate::core::locator::DocumentLocator;
use crate::core::remote::WorkflowApi;
use crate::core::reporter::{DocumentOutcome, Failure, RunMode, RunOutcome, RunReporter};
use crate::core::sync_engine::SyncEngine;
use crate::core::validator::{policy_warnings, WorkflowValidator};
use crate::utils::read_json_file;
use serde_json::Value;
use std::path::Path;

/// Validate and push every document under the locator root.
pub async fn run_sync(
    locator: &DocumentLocator,
    validator: &WorkflowValidator,
    api: &dyn WorkflowApi,
) -> Result<RunOutcome, AppError> {
    let documents = locator.locate()?;
    let mut reporter = RunReporter::new(RunMode::Sync, locator.root(), documents.len());
    if documents.is_empty() {
        return Ok(reporter.finish());
    }

    tracing::info!(
        "Importing {} workflow(s) from {}",
        documents.len(),
        locator.root().display()
    );
    let engine = SyncEngine::new(api);
    for path in &documents {
        let relative = locator.relative(path);
        let outcome = sync_document(path, validator, &engine).await;
        reporter.record(relative, outcome);
    }
    Ok(reporter.finish())
}

async fn sync_document(
    path: &Path,
    validator: &WorkflowValidator,
    engine: &SyncEngine<'_>,
) -> DocumentOutcome {
    let raw = match load(path) {
        Ok(raw) => raw,
        Err(failure) => return DocumentOutcome::Rejected(failure),
    };

    let report = validator.validate(&raw);
    if !report.is_valid() {
        return DocumentOutcome::Rejected(Failure::Schema(report));
    }

    let document = match WorkflowDocument::from_value(raw) {
        Ok(document) => document,
        Err(e) => {
            return DocumentOutcome::Rejected(Failure::Read(format!(
                "Invalid workflow document: {}",
                e
            )))
        }
    };

    let label = display_name(&document, path);
    DocumentOutcome::Synced(engine.sync(&document, &label).await)
}

/// Check every document under the locator root without contacting the service.
///
/// Unlike [`run_sync`], an `active: true` document counts as a failure here.
pub fn run_validation(
    locator: &DocumentLocator,
    validator: &WorkflowValidator,
) -> Result<RunOutcome, AppError> {
    let documents = locator.locate()?;
    let mut reporter = RunReporter::new(RunMode::Validate, locator.root(), documents.len());

    for path in &documents {
        let relative = locator.relative(path);
        let raw = match load(path) {
            Ok(raw) => raw,
            Err(failure) => {
                reporter.record(relative, DocumentOutcome::Rejected(failure));
                continue;
            }
        };

        let mut clean = true;
        let report = validator.validate(&raw);
        if !report.is_valid() {
            clean = false;
            reporter.record(relative, DocumentOutcome::Rejected(Failure::Schema(report)));
        }
        for warning in policy_warnings(&raw) {
            clean = false;
            reporter.record(
                relative,
                DocumentOutcome::Rejected(Failure::Policy(warning.to_string())),
            );
        }
        if clean {
            reporter.record(relative, DocumentOutcome::Valid);
        }
    }
    Ok(reporter.finish())
}

fn load(path: &Path) -> Result<Value, Failure> {
    read_json_file(path).map_err(|e| Failure::Read(e.message))
}

/// Workflow name for log lines, falling back to the directory holding the file.
fn display_name(document: &WorkflowDocument, path: &Path) -> String {
    document
        .name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .or_else(|| {
            path.parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| path.display().to_string())
}
