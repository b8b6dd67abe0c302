//! # Tracing Setup
//!
//! The library itself only emits `tracing` events. Binaries and tests that
//! want to see them call [`init_tracing`] once at startup: a console layer,
//! plus a JSON file layer rotated daily when `log_dir` is set. `RUST_LOG`
//! takes precedence over the configured level.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LogInitError {
    /// The log directory could not be created.
    #[error("I/O error occurred: {0}")]
    Io(#[from] io::Error),

    /// Neither `RUST_LOG` nor the configured level is a valid filter.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Failed to set global subscriber: {0}")]
    AlreadySet(String),
}

/// # Log Options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    /// Fallback filter when `RUST_LOG` is unset, e.g. `"info"`.
    pub level: String,
    /// Directory for daily-rotated JSON logs; `None` logs to the console only.
    pub log_dir: Option<PathBuf>,
    /// File name prefix for rotated logs.
    pub file_prefix: String,
    /// Colour the console output.
    pub ansi: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            file_prefix: "promquery".to_string(),
            ansi: true,
        }
    }
}

/// Builds the filter from `rust_log` when it is set and valid, else from `level`.
pub fn build_env_filter(rust_log: Option<&str>, level: &str) -> Result<EnvFilter, LogInitError> {
    if let Some(directives) = rust_log.map(str::trim).filter(|d| !d.is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return Ok(filter);
        }
    }
    EnvFilter::try_new(level).map_err(|e| LogInitError::Filter(e.to_string()))
}

/// Installs the global subscriber.
///
/// Returns the file writer guard when file logging is enabled; keep it alive
/// for as long as logs should be flushed.
pub fn init_tracing(options: &LogOptions) -> Result<Option<WorkerGuard>, LogInitError> {
    let rust_log = env::var("RUST_LOG").ok();
    let filter = build_env_filter(rust_log.as_deref(), &options.level)?;
    let console_layer = fmt::layer().with_target(true).with_ansi(options.ansi);

    match &options.log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let file_appender = rolling::daily(dir, &options.file_prefix);
            let (writer, guard) = non_blocking(file_appender);
            let file_layer = fmt::layer().with_ansi(false).with_writer(writer).json();

            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| LogInitError::AlreadySet(e.to_string()))?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .try_init()
                .map_err(|e| LogInitError::AlreadySet(e.to_string()))?;
            Ok(None)
        }
    }
}
