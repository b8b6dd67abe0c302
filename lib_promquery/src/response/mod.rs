//! # Response Module
//!
//! Decoding and normalization of instant-query responses.
//!
//! ## Contained Modules:
//!
//! - **`envelope`**: the `{status, data, errorType, error}` envelope, the
//!   `resultType` tag and the typed result variant.
//! - **`series`**: per-entry schemas (matrix series, vector sample), the
//!   uniform `ResponseDataSet` record and the `Sample` helper.
//! - **`normalizer`**: the dispatch from typed result to uniform records.

/// Envelope and result-type model.
pub mod envelope;
/// Uniform record dispatch.
pub mod normalizer;
/// Per-entry schemas and the uniform record.
pub mod series;

pub use envelope::{
    QueryResponse, ResponseData, ResponseStatus, ResultType, TypedResult, RESULT_TYPE_MATRIX,
    RESULT_TYPE_SCALAR, RESULT_TYPE_SCALARS, RESULT_TYPE_STRING, RESULT_TYPE_VECTOR,
    STATUS_ERROR, STATUS_SUCCESS,
};
pub use normalizer::normalize;
pub use series::{MatrixSeries, MetricLabels, ResponseDataSet, Sample, VectorSample};
