//! # Error Taxonomy
//!
//! Every fallible operation in the crate returns [`PromError`]. The variants
//! map one-to-one onto the stages of a query:
//!
//! - **Configuration** (`MethodNotAllowed`, `Validation`, `Config`): detected
//!   before any network call.
//! - **Transport**: the HTTP round-trip itself failed.
//! - **Decode**: the body is not a valid response envelope.
//! - **Upstream**: the envelope decoded but its `status` was not `success`.
//!
//! Malformed result entries are not errors at all; the normalizer drops them.

use std::io;

use thiserror::Error;

/// A single failed validation rule on a job field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}' failed on the '{rule}' rule")]
pub struct Violation {
    /// The job field that failed (e.g. `"endpoint"`).
    pub field: &'static str,
    /// The rule that was broken (e.g. `"required"`, `"url"`).
    pub rule: &'static str,
}

/// # Validation Error
///
/// Aggregates every constraint a job violated, not just the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_violations(.violations))]
pub struct ValidationError {
    /// Violations in field declaration order.
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Returns `true` if `field` appears in at least one violation.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while loading configuration or building the HTTP client.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error occurred: {0}")]
    Io(#[from] io::Error),

    /// The configuration file is not valid JSON for the expected shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// An override or field held a value that cannot be used.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Name of the offending key or environment variable.
        key: String,
        /// The rejected raw value.
        value: String,
    },

    /// The underlying `reqwest` client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// # Prom Error
///
/// The single error type handed back to callers of this crate.
#[derive(Debug, Error)]
pub enum PromError {
    /// The requested HTTP method is neither `GET` nor `POST`.
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    /// One or more job fields failed validation.
    #[error("invalid query job: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration could not be loaded or applied.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Network-level failure (connection refused, DNS, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not parse as a response envelope.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend answered with a non-success status.
    #[error("{error_type}: {error}")]
    Upstream {
        /// Backend-provided `errorType` (e.g. `bad_data`).
        error_type: String,
        /// Backend-provided `error` message.
        error: String,
    },
}

impl PromError {
    /// `true` for errors detected before any network I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PromError::MethodNotAllowed(_) | PromError::Validation(_) | PromError::Config(_)
        )
    }

    /// `true` for network-level failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, PromError::Transport(_))
    }

    /// `true` when the body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, PromError::Decode(_))
    }

    /// `true` when the backend reported an error status.
    pub fn is_upstream(&self) -> bool {
        matches!(self, PromError::Upstream { .. })
    }
}
