use serde::{Deserialize, Serialize};

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    ConfigurationError,
    DocumentError,
    ValidationError,
    RemoteError,
    SerializationError,
    IoError,
    InternalError,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Which remote write a document is being prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteMode {
    Create,
    Update,
}

impl WriteMode {
    pub fn is_update(self) -> bool {
        matches!(self, WriteMode::Update)
    }
}

/// Overall result of a run, mapped onto the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// No workflow documents were found under the root.
    NoDocuments,
    /// Every discovered document was processed without a recorded failure.
    Succeeded { processed: usize },
    /// At least one document failed.
    Failed { failures: usize },
}

impl RunStatus {
    pub fn is_success(self) -> bool {
        !matches!(self, RunStatus::Failed { .. })
    }

    pub fn exit_code(self) -> std::process::ExitCode {
        if self.is_success() {
            std::process::ExitCode::SUCCESS
        } else {
            std::process::ExitCode::FAILURE
        }
    }
}
