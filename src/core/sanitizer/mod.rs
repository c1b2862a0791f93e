use crate::core::document::WorkflowDocument;
use crate::core::types::WriteMode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body sent to the workflow service. Always a field subset of its source document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransmitDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub nodes: Vec<Value>,
    pub connections: Map<String, Value>,
    /// The service rejects writes without a settings object.
    pub settings: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Derive the transmit form of `document` for the given write.
///
/// Server-owned attributes, `active` and `pinData` are dropped. A create additionally
/// drops `id`. A missing or non-object `settings` becomes `{}`. The input is never
/// modified.
pub fn sanitize(document: &WorkflowDocument, mode: WriteMode) -> TransmitDocument {
    let source = document.clone();

    let id = if mode.is_update() { source.id } else { None };
    let settings = match source.settings {
        Some(Value::Object(settings)) => settings,
        _ => Map::new(),
    };

    TransmitDocument {
        id,
        name: source.name,
        nodes: source.nodes,
        connections: source.connections,
        settings,
        tags: source.tags,
        extra: source.extra,
    }
}
