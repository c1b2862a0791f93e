//! In-memory model of a workflow export (`workflow.json`).
//!
//! Only the fields the sync pipeline reasons about are named. Everything else rides in
//! [`WorkflowDocument::extra`] so schema additions on the service side pass through
//! untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One workflow as stored in the repository.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub nodes: Vec<Value>,
    pub connections: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_data: Option<Value>,
    #[serde(flatten)]
    pub server_managed: ServerManagedFields,
    /// Fields not modelled above, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Attributes owned by the service. They show up in exports but are never written back.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerManagedFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_version_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_count: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_counter: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Wire names of every server-owned attribute, in declaration order.
pub const SERVER_MANAGED_FIELDS: [&str; 10] = [
    "versionId",
    "activeVersionId",
    "updatedAt",
    "createdAt",
    "staticData",
    "triggerCount",
    "versionCounter",
    "isArchived",
    "ownedBy",
    "meta",
];

impl ServerManagedFields {
    pub fn is_empty(&self) -> bool {
        *self == ServerManagedFields::default()
    }
}

impl WorkflowDocument {
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Remote identifier, if one is assigned. Blank strings count as unassigned.
    pub fn remote_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// `true` only when `active` is literally the boolean `true`. Works on the raw value so
/// documents that fail to shape can still be checked.
pub fn marked_active(raw: &Value) -> bool {
    matches!(raw.get("active"), Some(Value::Bool(true)))
}
