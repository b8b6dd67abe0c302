//! # Response Envelope Model
//!
//! Strongly-typed view of the JSON returned by the instant-query API. An
//! explicit `null` in any envelope or `data` field reads as that field's
//! default. The individual entries of `data.result` stay as raw JSON until
//! [`ResponseData::into_typed`] sorts them by result type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::normalizer;
use super::series::{null_as_default, MatrixSeries, ResponseDataSet, VectorSample};

/// `status` value of a successful response.
pub const STATUS_SUCCESS: &str = "success";
/// `status` value of a failed response.
pub const STATUS_ERROR: &str = "error";

/// `resultType` tag for range vectors.
pub const RESULT_TYPE_MATRIX: &str = "matrix";
/// `resultType` tag for instant vectors.
pub const RESULT_TYPE_VECTOR: &str = "vector";
/// `resultType` tag for scalars as spelled by older clients.
pub const RESULT_TYPE_SCALARS: &str = "scalars";
/// `resultType` tag for scalars as sent by the backend.
pub const RESULT_TYPE_SCALAR: &str = "scalar";
/// `resultType` tag for strings.
pub const RESULT_TYPE_STRING: &str = "string";

/// Envelope status. Anything other than `success` is treated as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The query evaluated.
    Success,
    /// The backend rejected or failed the query.
    Error,
    /// Missing or unrecognised status.
    #[default]
    #[serde(other)]
    Unknown,
}

/// # Query Response
///
/// The top-level envelope. When `status` is not `success`, `error_type` and
/// `error` are authoritative and `data` must not be used.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Outcome reported by the backend.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ResponseStatus,
    /// Query result, meaningful only on success.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: ResponseData,
    /// Backend error message.
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: String,
    /// Backend error category (e.g. `bad_data`, `timeout`).
    #[serde(default, rename = "errorType", deserialize_with = "null_as_default")]
    pub error_type: String,
}

impl QueryResponse {
    /// `true` when the backend reported `success`.
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    /// Normalizes a copy of `data` into uniform records.
    pub fn data_set(&self) -> Vec<ResponseDataSet> {
        normalizer::normalize(self.data.clone())
    }

    /// Normalizes `data`, consuming the envelope.
    pub fn into_data_set(self) -> Vec<ResponseDataSet> {
        normalizer::normalize(self.data)
    }
}

/// # Response Data
///
/// The `data` block: a result type tag and the raw entries it describes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseData {
    /// Raw `resultType` tag.
    #[serde(default, rename = "resultType", deserialize_with = "null_as_default")]
    pub result_type: String,
    /// Raw result entries; their shape depends on `result_type`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: Vec<Value>,
}

/// Parsed `resultType` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultType {
    /// `matrix`
    Matrix,
    /// `vector`
    Vector,
    /// `scalar` or `scalars`
    Scalar,
    /// `string`
    String,
    /// Any other tag, kept verbatim.
    Other(String),
}

impl From<&str> for ResultType {
    fn from(tag: &str) -> Self {
        match tag {
            RESULT_TYPE_MATRIX => ResultType::Matrix,
            RESULT_TYPE_VECTOR => ResultType::Vector,
            RESULT_TYPE_SCALAR | RESULT_TYPE_SCALARS => ResultType::Scalar,
            RESULT_TYPE_STRING => ResultType::String,
            other => ResultType::Other(other.to_string()),
        }
    }
}

/// # Typed Result
///
/// `data.result` after dispatch on the result type. Matrix and vector entries
/// that do not fit their schema have already been dropped; the remaining
/// variants carry the raw entries untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedResult {
    /// Well-formed range-vector series.
    Matrix(Vec<MatrixSeries>),
    /// Well-formed instant-vector samples.
    Vector(Vec<VectorSample>),
    /// Raw scalar entries.
    Scalar(Vec<Value>),
    /// Raw string entries.
    String(Vec<Value>),
    /// Raw entries of an unrecognised result type.
    Other {
        /// The unrecognised tag.
        result_type: String,
        /// The raw entries.
        entries: Vec<Value>,
    },
}

impl ResponseData {
    /// The parsed `resultType`.
    pub fn kind(&self) -> ResultType {
        ResultType::from(self.result_type.as_str())
    }

    /// Decodes every entry against the schema of the declared result type.
    ///
    /// Entries that fail to decode are logged at `warn` and skipped, so one
    /// malformed series never hides the rest of the result.
    pub fn into_typed(self) -> TypedResult {
        match self.kind() {
            ResultType::Matrix => {
                TypedResult::Matrix(decode_entries(RESULT_TYPE_MATRIX, self.result))
            }
            ResultType::Vector => {
                TypedResult::Vector(decode_entries(RESULT_TYPE_VECTOR, self.result))
            }
            ResultType::Scalar => TypedResult::Scalar(self.result),
            ResultType::String => TypedResult::String(self.result),
            ResultType::Other(result_type) => TypedResult::Other {
                result_type,
                entries: self.result,
            },
        }
    }
}

fn decode_entries<T>(result_type: &str, entries: Vec<Value>) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
{
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<T>(entry) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(index, result_type, error = %e, "dropping malformed result entry");
                None
            }
        })
        .collect()
}
