//! # Structured Logging Module
//!
//! This module configures the `tracing` pipeline for lansweep: log level,
//! console output on stderr (stdout is reserved for discovery events), an
//! optional JSON format, and an optional non-blocking log file. Everything
//! is driven by environment variables so the command line stays small.
//!
//! ## Environment Variables
//!
//! - `LANSWEEP_LOG_LEVEL` — trace, debug, info, warn, error (default: info)
//! - `LANSWEEP_LOG_CONSOLE` — enable console output (default: true)
//! - `LANSWEEP_LOG_JSON` — JSON-formatted console output (default: false)
//! - `LANSWEEP_LOG_FILE` — path of an optional log file
//! - `LANSWEEP_LOG_CONSOLE_TIMESTAMPS` — timestamps on console lines
//!   (default: false)
//!
//! ## Example
//!
//! ```rust,no_run
//! use lansweep::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_env()?;
//! let _guard = init_logging(&config)?;
//!
//! tracing::info!("sweep starting");
//! # Ok::<(), lansweep::error::LanSweepError>(())
//! ```

use crate::error::{LanSweepError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Configuration for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to output to console (stderr)
    pub console: bool,
    /// Whether to output in JSON format
    pub json: bool,
    /// Log file path (optional)
    pub file_path: Option<PathBuf>,
    /// Whether to include timestamps in console output
    pub console_timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: true,
            json: false,
            file_path: None,
            console_timestamps: false,
        }
    }
}

impl LogConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(level) = std::env::var("LANSWEEP_LOG_LEVEL") {
            config.level = level;
        }

        if let Ok(console) = std::env::var("LANSWEEP_LOG_CONSOLE") {
            config.console = console
                .parse::<bool>()
                .map_err(|_| LanSweepError::config("Invalid LANSWEEP_LOG_CONSOLE value"))?;
        }

        if let Ok(json) = std::env::var("LANSWEEP_LOG_JSON") {
            config.json = json
                .parse::<bool>()
                .map_err(|_| LanSweepError::config("Invalid LANSWEEP_LOG_JSON value"))?;
        }

        if let Ok(file_path) = std::env::var("LANSWEEP_LOG_FILE") {
            config.file_path = Some(PathBuf::from(file_path));
        }

        if let Ok(timestamps) = std::env::var("LANSWEEP_LOG_CONSOLE_TIMESTAMPS") {
            config.console_timestamps = timestamps.parse::<bool>().map_err(|_| {
                LanSweepError::config("Invalid LANSWEEP_LOG_CONSOLE_TIMESTAMPS value")
            })?;
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.as_str()) {
            return Err(LanSweepError::config(format!(
                "Invalid log level '{}'. Valid levels: {}",
                self.level,
                valid_levels.join(", ")
            )));
        }

        if let Some(path) = &self.file_path {
            if path.file_name().is_none() {
                return Err(LanSweepError::config(
                    "Log file path must include a file name",
                ));
            }
        }

        Ok(())
    }
}

/// Initialize the global tracing subscriber from `config`
///
/// Returns the appender guard when a log file is configured; the caller must
/// hold it for the lifetime of the process or buffered lines are lost.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    config.validate()?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    let mut guard = None;

    if config.console {
        let layer = if config.json {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .json()
                .boxed()
        } else if config.console_timestamps {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .boxed()
        };
        layers.push(layer);
    }

    if let Some(path) = &config.file_path {
        let file_name = path
            .file_name()
            .ok_or_else(|| LanSweepError::config("Log file path must include a file name"))?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(appender);
        guard = Some(worker_guard);

        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(EnvFilter::new(&config.level))
        .try_init()
        .map_err(|e| LanSweepError::config(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}
