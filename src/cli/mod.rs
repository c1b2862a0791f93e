pub mod args;
pub mod commands;

pub use args::{NormalizeSchemaArgs, SyncArgs, ValidateArgs};
use crate::core::config::FileConfig;
use crate::core::types::RunStatus;
use clap::{Parser, Subcommand};
use std::path::Path;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

#[derive(Parser, Debug)]
#[command(name = "flowsync")]
#[command(version = crate::VERSION)]
#[command(about = "One-way sync of n8n workflow files to a workflow service")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: validate the tree in CI, then sync it from the deploy job."
)]
pub struct Args {
    /// Tracing filter directive, e.g. debug or flowsync=trace (overrides RUST_LOG)
    #[arg(long, global = true, value_name = "DIRECTIVE")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Push every workflow.json to the workflow service",
        long_about = "Sync validates each workflow.json under the tree and creates or updates it remotely. A document whose id is unknown remotely is created as new.",
        after_help = "Example:\n    N8N_API_URL=https://n8n.example.com/api/v1 N8N_API_KEY=... flowsync sync ./workflows"
    )]
    Sync(SyncArgs),
    #[command(
        about = "Check workflow files without contacting the service",
        long_about = "Validate runs the schema check over every workflow.json and rejects documents marked active.",
        after_help = "Example:\n    flowsync validate ./workflows"
    )]
    Validate(ValidateArgs),
    #[command(
        about = "Rename schema definitions that break JSON pointers",
        long_about = "Normalize-schema rewrites definition keys to [A-Za-z0-9_.-] and updates every $ref that pointed at them. The file is rewritten in place.",
        after_help = "Example:\n    flowsync normalize-schema schema/workflow-schema.json"
    )]
    NormalizeSchema(NormalizeSchemaArgs),
}

impl Command {
    /// Config file named on the command line, if any.
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            Command::Sync(args) => args.config.as_deref(),
            Command::Validate(args) => args.config.as_deref(),
            Command::NormalizeSchema(_) => None,
        }
    }
}

pub async fn run(args: Args, file_config: &FileConfig, cwd: &Path) -> crate::Result<RunStatus> {
    match args.command {
        Command::Sync(sync_args) => commands::sync(sync_args, file_config, cwd).await,
        Command::Validate(validate_args) => commands::validate(validate_args, file_config, cwd),
        Command::NormalizeSchema(normalize_args) => commands::normalize_schema(normalize_args, cwd),
    }
}
