use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read and parse a JSON file.
///
/// Unreadable files map to `IoError`; malformed content maps to `DocumentError` with an
/// `Invalid JSON: ...` message.
pub fn read_json_file(path: &Path) -> Result<Value, AppError> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("Failed to read {}: {}", path.display(), e),
        )
    })?;
    serde_json::from_str(&content).map_err(|e| {
        AppError::new(ErrorCategory::DocumentError, format!("Invalid JSON: {}", e))
            .with_context(path.display().to_string())
    })
}

/// Write `value` pretty-printed with two-space indentation.
pub fn write_json_file(path: &Path, value: &Value) -> Result<(), AppError> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("Failed to write {}: {}", path.display(), e),
        )
    })
}
