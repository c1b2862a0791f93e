pub mod config;
pub mod layers;

pub use layers::console::ConsoleOutput;

use crate::core::config::LoggingSection;
use crate::logging::config::LoggingConfig;
use crate::logging::layers::{console, file};
use crate::Result;
use anyhow::{anyhow, Context};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;

static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Guards that keep logging sinks active for the duration of the command.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    console_output: ConsoleOutput,
    log_file_path: Option<PathBuf>,
}

impl LoggingGuard {
    /// Returns the console output configuration used during initialization.
    pub fn console_output(&self) -> ConsoleOutput {
        self.console_output
    }

    /// Returns the log file path when the file sink is enabled.
    pub fn log_file_path(&self) -> Option<&Path> {
        self.log_file_path.as_deref()
    }
}

/// Initialize logging for one command invocation.
///
/// The filter comes from `level_override` (the `--log-level` flag), then `RUST_LOG`,
/// then the config file's `default_level`. Errors when invoked more than once per
/// process unless tests explicitly reset the guard.
pub fn init(
    level_override: Option<&str>,
    section: &LoggingSection,
    cwd: &Path,
) -> Result<LoggingGuard> {
    if LOGGER_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(anyhow!("logging already initialized"));
    }

    let config = LoggingConfig::from_section(section)?;
    let env_filter = build_filter(level_override, &config.default_level)?;
    let log_file_path = file::log_file_path(&config, cwd);

    type BaseRegistry = Registry;
    type FileSubscriber = file::FileLayerStack<BaseRegistry>;

    let (file_layer, file_guard) =
        file::file_layer::<BaseRegistry>(&log_file_path, config.enable_file)?;
    let console_layer = console::console_layer::<FileSubscriber>(config.console_output);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(env_filter)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
        console_output: config.console_output,
        log_file_path: config.enable_file.then_some(log_file_path),
    })
}

fn build_filter(level_override: Option<&str>, default_level: &str) -> Result<EnvFilter> {
    match level_override {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid --log-level '{}'", level)),
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_level))
            .context("failed to configure tracing level"),
    }
}

#[cfg(test)]
/// Reset the initialization guard so tests can reconfigure logging multiple times.
pub fn reset_for_tests() {
    LOGGER_INITIALIZED.store(false, Ordering::SeqCst);
}
