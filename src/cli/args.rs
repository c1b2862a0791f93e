use crate::core::config::ConfigOverrides;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// Root of the workflows tree (default: $WORKFLOWS_DIR, then ./workflows)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Base URL of the n8n public API (default: $N8N_API_URL)
    #[arg(long, value_name = "URL", help_heading = "Remote")]
    pub api_url: Option<String>,

    /// API key sent with every request (default: $N8N_API_KEY)
    #[arg(long, value_name = "KEY", help_heading = "Remote")]
    pub api_key: Option<String>,

    /// Push reference attached to every write (default: $N8N_PUSH_REF, then git-sync)
    #[arg(long, value_name = "TAG", help_heading = "Remote")]
    pub push_ref: Option<String>,

    /// Schema file replacing the bundled workflow schema
    #[arg(long, value_name = "FILE", help_heading = "Validation")]
    pub schema: Option<PathBuf>,

    /// Path to custom config file (default: ./flowsync.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

impl SyncArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            workflows_dir: self.dir.clone(),
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            push_ref: self.push_ref.clone(),
            schema: self.schema.clone(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Root of the workflows tree (default: $WORKFLOWS_DIR, then ./workflows)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Schema file replacing the bundled workflow schema
    #[arg(long, value_name = "FILE", help_heading = "Validation")]
    pub schema: Option<PathBuf>,

    /// Path to custom config file (default: ./flowsync.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

impl ValidateArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            workflows_dir: self.dir.clone(),
            schema: self.schema.clone(),
            ..Default::default()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct NormalizeSchemaArgs {
    /// Schema file to rewrite in place
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}
