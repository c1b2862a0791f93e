pub mod config;
pub mod document;
pub mod error;
pub mod locator;
pub mod pipeline;
pub mod remote;
pub mod reporter;
pub mod sanitizer;
pub mod schema_normalizer;
pub mod sync_engine;
pub mod types;
pub mod validator;

pub use config::{ConfigLoader, ConfigValidator};
pub use document::WorkflowDocument;
pub use error::AppError;
pub use locator::DocumentLocator;
pub use pipeline::{run_sync, run_validation};
pub use remote::{N8nClient, WorkflowApi};
pub use reporter::{RunOutcome, RunReporter};
pub use sanitizer::{sanitize, TransmitDocument};
pub use sync_engine::{SyncEngine, SyncOutcome};
pub use types::*;
pub use validator::WorkflowValidator;
