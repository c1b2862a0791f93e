//! Write side of the workflow service API.

pub mod client;

pub use client::N8nClient;

use crate::core::sanitizer::TransmitDocument;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Workflow as echoed back by the service after a write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteWorkflow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Error types for workflow API calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error(
        "Status: {status} Code: {} Message: {message}",
        .code.as_deref().unwrap_or("n/a")
    )]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<Value>,
    },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Deserialization error: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn details(&self) -> Option<&Value> {
        match self {
            ApiError::Status { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

/// Outcome of an update, with "no such workflow" kept apart from real failures.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateResult {
    Updated(RemoteWorkflow),
    NotFound,
    Failed(ApiError),
}

/// Remote capability consumed by the sync engine.
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    async fn create_workflow(&self, document: &TransmitDocument)
        -> Result<RemoteWorkflow, ApiError>;

    async fn update_workflow(&self, id: &str, document: &TransmitDocument) -> UpdateResult;
}
