//! # Query Job Module
//!
//! A [`PromJob`] describes one instant query: where to send it, what to ask,
//! and which HTTP method to use. Jobs are validated when they are built, so an
//! existing `PromJob` is always safe to hand to the executor.

/// The job descriptor, its method enum and the validator.
pub mod prom_job;

pub use prom_job::{PromJob, QueryMethod, QUERY_API, VERSION_V1};
