// File: ./src/logging.rs
// File logger setup. Stdout belongs to the conversation, so logs never go there.
use crate::context::AppContext;
use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::OpenOptions;
use std::str::FromStr;

/// Parses a config level name. Unknown names fall back to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    LevelFilter::from_str(name.trim()).unwrap_or(LevelFilter::Info)
}

/// Installs an append-mode file logger at the context's log path.
/// Callers treat failure as non-fatal.
pub fn init(ctx: &dyn AppContext, level: &str) -> Result<()> {
    let level = parse_level(level);
    if level == LevelFilter::Off {
        return Ok(());
    }
    let path = ctx
        .get_log_path()
        .ok_or_else(|| anyhow::anyhow!("No data directory for the log file"))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(level, config, file)
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
    log::info!("Logging to {:?} at level {}", path, level);
    Ok(())
}
