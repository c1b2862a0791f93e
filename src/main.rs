use anyhow::Context;
use clap::Parser;
use flowsync::cli::{self, Args};
use flowsync::core::config::ConfigLoader;
use flowsync::core::error::AppError;
use flowsync::logging;
use std::env;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let cwd = match env::current_dir().context("failed to determine working directory") {
        Ok(cwd) => cwd,
        Err(err) => {
            eprintln!("{:#}", err);
            return ExitCode::FAILURE;
        }
    };

    let file_config = match ConfigLoader::load_file(args.command.config_path(), &cwd) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err.message);
            return ExitCode::FAILURE;
        }
    };

    let _guard = match logging::init(args.log_level.as_deref(), &file_config.logging, &cwd) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("failed to initialize logging: {:#}", err);
            return ExitCode::FAILURE;
        }
    };

    match cli::run(args, &file_config, &cwd).await {
        Ok(status) => status.exit_code(),
        Err(err) => {
            match err.downcast_ref::<AppError>() {
                Some(app) if app.is_configuration() => tracing::error!("{}", app.message),
                _ => tracing::error!("Unexpected failure: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
