use crate::core::document::marked_active;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Schema shipped with the binary, used when no override is configured.
pub const BUNDLED_SCHEMA: &str = include_str!("../../../schema/workflow-schema.json");

pub const ACTIVE_WORKFLOW_WARNING: &str =
    "Workflow marked as active=true. Consider committing workflows in an inactive state.";

/// A single schema violation located by JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaViolation {
    pub pointer: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pointer, self.message)
    }
}

/// Result of checking one document against the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<SchemaViolation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All violations joined as `<pointer> <message>; ...`.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Compiled workflow schema. Build once per run and reuse for every document.
pub struct WorkflowValidator {
    validator: jsonschema::Validator,
}

impl WorkflowValidator {
    pub fn bundled() -> Result<Self, AppError> {
        let schema: Value = serde_json::from_str(BUNDLED_SCHEMA).map_err(|e| {
            AppError::new(
                ErrorCategory::InternalError,
                format!("Bundled workflow schema is not valid JSON: {}", e),
            )
        })?;
        Self::from_schema(&schema)
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read schema {}: {}", path.display(), e),
            )
        })?;
        let schema: Value = serde_json::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigurationError,
                format!("Failed to parse schema {}: {}", path.display(), e),
            )
        })?;
        Self::from_schema(&schema)
    }

    /// Load `path` when given, otherwise the bundled schema.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::bundled(),
        }
    }

    pub fn from_schema(schema: &Value) -> Result<Self, AppError> {
        let validator = jsonschema::validator_for(schema).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigurationError,
                format!("Failed to compile workflow schema: {}", e),
            )
        })?;
        Ok(WorkflowValidator { validator })
    }

    pub fn validate(&self, document: &Value) -> ValidationReport {
        let errors = self
            .validator
            .iter_errors(document)
            .map(|error| {
                let pointer = error.instance_path.to_string();
                SchemaViolation {
                    pointer: if pointer.is_empty() {
                        "/".to_string()
                    } else {
                        pointer
                    },
                    message: error.to_string(),
                }
            })
            .collect();
        ValidationReport { errors }
    }
}

/// Repository policy checks applied on top of the schema. Only the validation-only
/// entry point treats these as failures.
pub fn policy_warnings(document: &Value) -> Vec<&'static str> {
    let mut warnings = Vec::new();
    if marked_active(document) {
        warnings.push(ACTIVE_WORKFLOW_WARNING);
    }
    warnings
}
