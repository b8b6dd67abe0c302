//! # Configuration Modules
//!
//! Layered configuration for the query client: a JSON file, then
//! environment variable overrides.

/// Provides client configuration loading and environment overrides.
pub mod config_client;

pub use config_client::{apply_overrides, load_config, PromQueryConfig};
