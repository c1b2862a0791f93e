use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::path::{Path, PathBuf};

/// File name every workflow export is stored under.
pub const WORKFLOW_FILE_NAME: &str = "workflow.json";

/// Finds workflow documents below a root directory.
pub struct DocumentLocator {
    root: PathBuf,
}

impl DocumentLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DocumentLocator { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All `workflow.json` files under the root at any depth, sorted by path.
    ///
    /// A missing root yields an empty list.
    pub fn locate(&self) -> Result<Vec<PathBuf>, AppError> {
        if !self.root.is_dir() {
            tracing::debug!("workflows root {} does not exist", self.root.display());
            return Ok(Vec::new());
        }

        let pattern = format!(
            "{}/**/{}",
            glob::Pattern::escape(&self.root.to_string_lossy()),
            WORKFLOW_FILE_NAME
        );
        let entries = glob::glob(&pattern).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Invalid workflow search pattern {}: {}", pattern, e),
            )
        })?;

        let mut documents = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| {
                AppError::new(
                    ErrorCategory::IoError,
                    format!("Failed to scan {}: {}", e.path().display(), e.error()),
                )
            })?;
            if path.is_file() {
                documents.push(path);
            }
        }
        documents.sort();
        Ok(documents)
    }

    /// Path of `document` relative to the root, for log lines and failure reports.
    pub fn relative<'a>(&self, document: &'a Path) -> &'a Path {
        match document.strip_prefix(&self.root) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative,
            _ => document,
        }
    }
}
