use crate::core::remote::ApiError;
use crate::core::sync_engine::SyncOutcome;
use crate::core::types::RunStatus;
use crate::core::validator::ValidationReport;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which entry point produced a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Sync,
    Validate,
}

/// Why a document was rejected before (or instead of) reaching the remote service.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// Unreadable file, malformed JSON, or a document that cannot be shaped.
    Read(String),
    Schema(ValidationReport),
    /// Repository policy, only raised by validation-only runs.
    Policy(String),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Read(message) | Failure::Policy(message) => write!(f, "{}", message),
            Failure::Schema(report) => {
                write!(f, "Schema validation failed: {}", report.summary())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    Synced(SyncOutcome),
    /// Passed every check in a validation-only run.
    Valid,
    Rejected(Failure),
}

impl DocumentOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            DocumentOutcome::Rejected(_) | DocumentOutcome::Synced(SyncOutcome::Failed(_))
        )
    }

    /// Short failure category for reports, `None` for successes.
    pub fn category(&self) -> Option<&'static str> {
        match self {
            DocumentOutcome::Rejected(Failure::Read(_)) => Some("read"),
            DocumentOutcome::Rejected(Failure::Schema(_)) => Some("schema"),
            DocumentOutcome::Rejected(Failure::Policy(_)) => Some("policy"),
            DocumentOutcome::Synced(SyncOutcome::Failed(_)) => Some("remote"),
            _ => None,
        }
    }

    fn remote_error(&self) -> Option<&ApiError> {
        match self {
            DocumentOutcome::Synced(SyncOutcome::Failed(error)) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentOutcome::Synced(SyncOutcome::Created { id }) => {
                write!(f, "created {}", id.as_deref().unwrap_or("(no id returned)"))
            }
            DocumentOutcome::Synced(SyncOutcome::Updated { id }) => write!(f, "updated {}", id),
            DocumentOutcome::Synced(SyncOutcome::CreatedViaFallback { stale_id, id }) => write!(
                f,
                "created {} (id {} not found remotely)",
                id.as_deref().unwrap_or("(no id returned)"),
                stale_id
            ),
            DocumentOutcome::Synced(SyncOutcome::Failed(error)) => write!(f, "{}", error),
            DocumentOutcome::Valid => write!(f, "valid"),
            DocumentOutcome::Rejected(failure) => write!(f, "{}", failure),
        }
    }
}

/// Outcome recorded for one document, keyed by its path relative to the scanned root.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub path: PathBuf,
    pub outcome: DocumentOutcome,
}

/// Everything a run produced, in processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub mode: RunMode,
    pub root: PathBuf,
    pub discovered: usize,
    pub records: Vec<DocumentRecord>,
}

impl RunOutcome {
    pub fn failures(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.records.iter().filter(|record| record.outcome.is_failure())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn status(&self) -> RunStatus {
        let failures = self.failure_count();
        if failures > 0 {
            RunStatus::Failed { failures }
        } else if self.discovered == 0 {
            RunStatus::NoDocuments
        } else {
            RunStatus::Succeeded {
                processed: self.discovered,
            }
        }
    }

    /// Emit the end-of-run summary: every failure with its cause, then the totals.
    pub fn log_summary(&self) {
        match (self.mode, self.status()) {
            (_, RunStatus::NoDocuments) => {
                tracing::info!("No workflow.json files found under {}", self.root.display());
            }
            (RunMode::Sync, RunStatus::Succeeded { processed }) => {
                tracing::info!("Successfully imported {} workflow(s)", processed);
            }
            (RunMode::Validate, RunStatus::Succeeded { .. }) => {
                tracing::info!("All workflow JSON files passed validation");
            }
            (mode, RunStatus::Failed { failures }) => {
                if mode == RunMode::Validate {
                    tracing::error!("Found workflow issues:");
                }
                for record in self.failures() {
                    tracing::error!(
                        category = record.outcome.category().unwrap_or("unknown"),
                        " - {}: {}",
                        record.path.display(),
                        record.outcome
                    );
                }
                if mode == RunMode::Sync {
                    tracing::error!("Completed with {} failure(s)", failures);
                }
            }
        }
    }
}

/// Accumulates per-document outcomes for a single run.
pub struct RunReporter {
    outcome: RunOutcome,
}

impl RunReporter {
    pub fn new(mode: RunMode, root: &Path, discovered: usize) -> Self {
        RunReporter {
            outcome: RunOutcome {
                mode,
                root: root.to_path_buf(),
                discovered,
                records: Vec::with_capacity(discovered),
            },
        }
    }

    pub fn record(&mut self, path: &Path, outcome: DocumentOutcome) {
        if outcome.is_failure() {
            match (self.outcome.mode, outcome.remote_error()) {
                (RunMode::Sync, Some(error)) => {
                    tracing::error!("Failed to import {}", path.display());
                    tracing::error!("{}", error);
                    if let Some(details) = error.details() {
                        tracing::error!("{}", details);
                    }
                }
                (RunMode::Sync, None) => {
                    tracing::error!("Failed to import {}: {}", path.display(), outcome);
                }
                (RunMode::Validate, _) => {
                    tracing::debug!("{}: {}", path.display(), outcome);
                }
            }
        } else {
            tracing::debug!("{}: {}", path.display(), outcome);
        }
        self.outcome.records.push(DocumentRecord {
            path: path.to_path_buf(),
            outcome,
        });
    }

    pub fn finish(self) -> RunOutcome {
        self.outcome
    }
}
