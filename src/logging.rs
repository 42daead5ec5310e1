//! File-backed tracing setup. The terminal belongs to the TUI, so log lines go
//! to the configured log file instead of stdout.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Install the global subscriber. Callers treat failure as non-fatal.
pub fn init(config: &AppConfig) -> Result<()> {
    if let Some(parent) = config.log_file.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log level `{}`", config.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install tracing subscriber")
}
