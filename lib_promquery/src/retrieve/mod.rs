//! # Data Retrieval Module
//!
//! Everything that touches the network: building the HTTP request for a job,
//! configuring the blocking client, and running the query.
//!
//! ## Contained Modules:
//!
//! - **`transport`**: `TransportConfig`, the explicit client settings
//!   (timeouts, connection reuse, query encoding) with documented defaults.
//! - **`request`**: `QueryRequest`, the pure GET/POST request construction.
//! - **`query_executor`**: `QueryExecutor`, which sends the request, decodes
//!   the envelope, checks its status and hands `data` to the normalizer.

/// Blocking executor for instant queries.
pub mod query_executor;
/// Pure request construction from a job.
pub mod request;
/// Client configuration with documented defaults.
pub mod transport;

pub use query_executor::QueryExecutor;
pub use request::{QueryPost, QueryRequest};
pub use transport::TransportConfig;
