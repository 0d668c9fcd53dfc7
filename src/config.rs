// File: ./src/config.rs
// Handles configuration loading and defaults.
use crate::context::AppContext;
use anyhow::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_exit_delay_ms() -> u64 {
    500
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Task file location. Relative paths are taken as-is (relative to the
    /// working directory). `None` means `<data dir>/tasks.txt`.
    #[serde(default)]
    pub storage_file: Option<PathBuf>,
    /// One of off, error, warn, info, debug, trace.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_true")]
    pub show_welcome: bool,
    /// How long the TUI keeps the farewell on screen after `bye`.
    #[serde(default = "default_exit_delay_ms")]
    pub exit_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        // Match the serde defaults
        Self {
            storage_file: None,
            log_level: default_log_level(),
            show_welcome: true,
            exit_delay_ms: default_exit_delay_ms(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults. Any
    /// other failure (unreadable, invalid TOML) is still an error.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Whether an error from [`Config::load`] just means there is no file yet.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        // Wrapped IO NotFound anywhere in the chain
        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    /// Task file to use: the configured one, or the context default.
    pub fn task_file_path(&self, ctx: &dyn AppContext) -> PathBuf {
        self.storage_file
            .clone()
            .unwrap_or_else(|| ctx.get_task_file_path())
    }
}
