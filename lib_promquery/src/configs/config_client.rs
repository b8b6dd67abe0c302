//! # Client Configuration
//!
//! Resolves a [`PromQueryConfig`] from, in increasing priority:
//!
//! 1. Built-in defaults.
//! 2. A JSON file, given explicitly or through `PROMQUERY_CONFIG`.
//! 3. `PROMQUERY_ENDPOINT`, `PROMQUERY_METHOD`, `PROMQUERY_TIMEOUT_MS` and
//!    `PROMQUERY_ENCODE_QUERY`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, PromError};
use crate::job::PromJob;
use crate::retrieve::{QueryExecutor, TransportConfig};

/// Path of the JSON configuration file.
pub const ENV_CONFIG_PATH: &str = "PROMQUERY_CONFIG";
/// Overrides `endpoint`.
pub const ENV_ENDPOINT: &str = "PROMQUERY_ENDPOINT";
/// Overrides `method`.
pub const ENV_METHOD: &str = "PROMQUERY_METHOD";
/// Overrides `transport.timeout_ms`; `0` disables the timeout.
pub const ENV_TIMEOUT_MS: &str = "PROMQUERY_TIMEOUT_MS";
/// Overrides `transport.encode_query`.
pub const ENV_ENCODE_QUERY: &str = "PROMQUERY_ENCODE_QUERY";

/// # PromQuery Config
///
/// Everything needed to build jobs and an executor without repeating the
/// endpoint and method at every call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromQueryConfig {
    /// Backend base URL, e.g. `http://127.0.0.1:9090`.
    pub endpoint: Option<String>,
    /// `GET` or `POST`.
    pub method: String,
    /// HTTP client settings.
    pub transport: TransportConfig,
}

impl Default for PromQueryConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            method: "GET".to_string(),
            transport: TransportConfig::default(),
        }
    }
}

impl PromQueryConfig {
    /// Reads a configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Builds a validated job for `query` against the configured endpoint.
    ///
    /// A missing endpoint surfaces as a `required` validation failure.
    pub fn job(&self, query: &str) -> Result<PromJob, PromError> {
        let endpoint = self.endpoint.as_deref().unwrap_or_default();
        PromJob::new(endpoint, query, &self.method)
    }

    /// Builds an executor from the transport settings.
    pub fn executor(&self) -> Result<QueryExecutor, PromError> {
        QueryExecutor::new(self.transport.clone())
    }
}

/// Applies environment-style overrides, reading each key through `lookup`.
pub fn apply_overrides<F>(mut config: PromQueryConfig, lookup: F) -> Result<PromQueryConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup(ENV_ENDPOINT) {
        config.endpoint = Some(endpoint.trim().to_string());
    }
    if let Some(method) = lookup(ENV_METHOD) {
        config.method = method.trim().to_string();
    }
    if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
        let ms: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: ENV_TIMEOUT_MS.to_string(),
            value: raw.clone(),
        })?;
        config.transport.timeout_ms = if ms == 0 { None } else { Some(ms) };
    }
    if let Some(raw) = lookup(ENV_ENCODE_QUERY) {
        config.transport.encode_query = parse_flag(&raw).ok_or_else(|| ConfigError::InvalidValue {
            key: ENV_ENCODE_QUERY.to_string(),
            value: raw.clone(),
        })?;
    }
    Ok(config)
}

/// Loads the file at `path` (or `$PROMQUERY_CONFIG`), then applies the
/// process environment on top.
pub fn load_config(path: Option<&Path>) -> Result<PromQueryConfig, ConfigError> {
    let path: Option<PathBuf> = path
        .map(Path::to_path_buf)
        .or_else(|| env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from));

    let config = match path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading promquery config");
            PromQueryConfig::from_json_file(&p)?
        }
        None => PromQueryConfig::default(),
    };

    apply_overrides(config, |key| env::var(key).ok())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
