//! Logging setup.
//!
//! All modules log through the `log` facade; this module installs the `fern`
//! dispatcher that decides where those lines go.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;

use crate::config::LoggingConfig;
use crate::constants::{CONFIG_DIR_NAME, LOG_FILE_NAME};

/// Location of the log file, under the user's cache directory
pub fn get_log_file_path() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir().context("Could not determine cache directory")?;
    Ok(cache_dir.join(CONFIG_DIR_NAME).join(LOG_FILE_NAME))
}

/// Build the dispatcher for `config`.
///
/// Lines go to the log file when logging is enabled and to stderr when
/// `verbose` is set. With neither, nothing is emitted.
pub fn build_dispatch(config: &LoggingConfig, verbose: bool) -> Result<fern::Dispatch> {
    let level = config.level_filter()?;

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] {:<5} {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Warn)
        .level_for("datasources", level);

    if config.enabled {
        let path = get_log_file_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        let file = fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
        dispatch = dispatch.chain(file);
    }

    if verbose {
        dispatch = dispatch.chain(std::io::stderr());
    }

    Ok(dispatch)
}

/// Install the global logger. Must be called at most once.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    build_dispatch(config, verbose)?
        .apply()
        .context("Logger already initialized")
}
