use crate::core::document::WorkflowDocument;
use crate::core::remote::{ApiError, UpdateResult, WorkflowApi};
use crate::core::sanitizer::sanitize;
use crate::core::types::WriteMode;

/// What happened to one document on the remote side.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Created {
        id: Option<String>,
    },
    Updated {
        id: String,
    },
    /// The stored id was unknown remotely, so the workflow was created afresh.
    CreatedViaFallback {
        stale_id: String,
        id: Option<String>,
    },
    Failed(ApiError),
}

/// Decides create vs. update for each document and performs the call.
pub struct SyncEngine<'a> {
    api: &'a dyn WorkflowApi,
}

impl<'a> SyncEngine<'a> {
    pub fn new(api: &'a dyn WorkflowApi) -> Self {
        SyncEngine { api }
    }

    /// Push one validated document. `label` is only used for log lines.
    pub async fn sync(&self, document: &WorkflowDocument, label: &str) -> SyncOutcome {
        match document.remote_id() {
            Some(id) => self.update_or_create(document, id, label).await,
            None => self.create(document, label).await,
        }
    }

    async fn update_or_create(
        &self,
        document: &WorkflowDocument,
        id: &str,
        label: &str,
    ) -> SyncOutcome {
        let body = sanitize(document, WriteMode::Update);
        match self.api.update_workflow(id, &body).await {
            UpdateResult::Updated(_) => {
                tracing::info!("PUT /workflows/{} ({})", id, label);
                SyncOutcome::Updated { id: id.to_string() }
            }
            UpdateResult::NotFound => {
                tracing::warn!("workflow id {} not found, creating new ({})", id, label);
                match self.create(document, label).await {
                    SyncOutcome::Created { id: created } => SyncOutcome::CreatedViaFallback {
                        stale_id: id.to_string(),
                        id: created,
                    },
                    other => other,
                }
            }
            UpdateResult::Failed(error) => SyncOutcome::Failed(error),
        }
    }

    async fn create(&self, document: &WorkflowDocument, label: &str) -> SyncOutcome {
        let body = sanitize(document, WriteMode::Create);
        match self.api.create_workflow(&body).await {
            Ok(created) => {
                tracing::info!("POST /workflows ({})", label);
                SyncOutcome::Created { id: created.id }
            }
            Err(error) => SyncOutcome::Failed(error),
        }
    }
}
