//! # lib_promquery
//!
//! A blocking client for the Prometheus instant-query API
//! (`/api/v1/query`) that turns every result type into one uniform record
//! shape, [`ResponseDataSet`].
//!
//! ```no_run
//! use lib_promquery::{PromJob, QueryExecutor, TransportConfig};
//!
//! # fn main() -> Result<(), lib_promquery::PromError> {
//! let job = PromJob::new("http://127.0.0.1:9090", "up", "GET")?;
//! let executor = QueryExecutor::new(TransportConfig::default())?;
//! for record in executor.execute(job)? {
//!     println!("{} {:?}", record.metric.instance, record.data);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - **`job`**: job descriptor and validation.
//! - **`retrieve`**: transport configuration and the query executor.
//! - **`response`**: envelope model and the normalizer.
//! - **`errors`**: the crate-wide error type.
//! - **`configs`** (feature `configs`): JSON + environment configuration.
//! - **`loggers`** (feature `loggers`): `tracing` subscriber setup.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Error taxonomy shared by every module.
pub mod errors;
/// Query job descriptor and validator.
pub mod job;
/// Response envelope model and normalization.
pub mod response;
/// HTTP transport and the blocking query executor.
pub mod retrieve;

/// Layered client configuration.
#[cfg(feature = "configs")]
pub mod configs;
/// Tracing subscriber setup.
#[cfg(feature = "loggers")]
pub mod loggers;

// --- Public API Re-exports ---
pub use errors::{ConfigError, PromError, ValidationError, Violation};
pub use job::{PromJob, QueryMethod, QUERY_API, VERSION_V1};
pub use response::{normalize, MetricLabels, QueryResponse, ResponseData, ResponseDataSet, Sample};
pub use retrieve::{QueryExecutor, QueryRequest, TransportConfig};
