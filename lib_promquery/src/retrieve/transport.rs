//! # Transport Configuration
//!
//! Explicit settings for the blocking HTTP client behind the query executor.
//! Every field has a default, so a partial JSON object (or none at all) is a
//! valid configuration.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default request timeout, the same 30 seconds `reqwest::blocking` uses.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default lifetime of an idle pooled connection.
pub const DEFAULT_POOL_IDLE_TIMEOUT_MS: u64 = 90_000;

/// # Transport Config
///
/// Defaults:
/// - `timeout_ms`: `30000` for the whole request, including the body read.
/// - `connect_timeout_ms`: none.
/// - `pool_idle_timeout_ms`: `90000`; `None` keeps idle connections forever.
/// - `pool_max_idle_per_host`: unbounded, so connections are always reused.
/// - `user_agent`: `promquery/<version>`.
/// - `encode_query`: `false`, the query is placed in the GET URL verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Total request timeout in milliseconds; `None` disables it.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
    /// How long an idle pooled connection is kept, in milliseconds.
    pub pool_idle_timeout_ms: Option<u64>,
    /// Maximum idle connections kept per host; `0` disables reuse.
    pub pool_max_idle_per_host: usize,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Percent-encode the query in GET URLs.
    pub encode_query: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_ms: Some(DEFAULT_TIMEOUT_MS),
            connect_timeout_ms: None,
            pool_idle_timeout_ms: Some(DEFAULT_POOL_IDLE_TIMEOUT_MS),
            pool_max_idle_per_host: usize::MAX,
            user_agent: format!("promquery/{}", env!("CARGO_PKG_VERSION")),
            encode_query: false,
        }
    }
}

impl TransportConfig {
    /// Total request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Connect timeout.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    /// Idle timeout for pooled connections.
    pub fn pool_idle_timeout(&self) -> Option<Duration> {
        self.pool_idle_timeout_ms.map(Duration::from_millis)
    }

    /// Builds a blocking `reqwest` client from these settings.
    ///
    /// Must not be called from inside an async runtime.
    pub fn build_client(&self) -> Result<Client, ConfigError> {
        Client::builder()
            .timeout(self.timeout())
            .connect_timeout(self.connect_timeout())
            .pool_idle_timeout(self.pool_idle_timeout())
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(ConfigError::Client)
    }
}
