//! # Query Executor
//!
//! Blocking executor for instant queries, built on `reqwest::blocking`.
//!
//! One call is one HTTP round-trip: no retries and no backoff. The response
//! body is read in full and the response dropped before decoding, so the
//! connection goes back to the pool (or is closed) on every exit path.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use super::request::QueryRequest;
use super::transport::TransportConfig;
use crate::errors::PromError;
use crate::job::PromJob;
use crate::response::{QueryResponse, ResponseDataSet};

/// # Query Executor
///
/// Holds the HTTP client and its configuration. It carries no per-query
/// state, so one executor can be shared by reference across threads.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    /// The underlying blocking client (connection pool included).
    inner: Client,
    /// Settings the client was built from, plus request-building flags.
    config: TransportConfig,
}

impl QueryExecutor {
    /// Creates an executor with a client built from `config`.
    ///
    /// # Errors
    /// [`PromError::Config`] if the client cannot be built.
    pub fn new(config: TransportConfig) -> Result<Self, PromError> {
        let inner = config.build_client()?;
        Ok(Self { inner, config })
    }

    /// Creates an executor around an existing client.
    ///
    /// Only the request-building flags of `config` (such as `encode_query`)
    /// apply; timeouts and pooling are whatever `client` was built with.
    pub fn with_client(client: Client, config: TransportConfig) -> Self {
        Self {
            inner: client,
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Sends `job` and returns the success-checked envelope.
    ///
    /// # Errors
    /// - `Transport` if the request cannot be sent or the body cannot be read.
    /// - `Decode` if the body is not a response envelope.
    /// - `Upstream` if the envelope status is not `success`; `data` is not
    ///   inspected in that case.
    pub fn query(&self, job: PromJob) -> Result<QueryResponse, PromError> {
        let request = QueryRequest::from_job(&job, self.config.encode_query)?;
        tracing::debug!(method = %request.method(), url = %request.url(), "dispatching instant query");

        let builder = match request {
            QueryRequest::Get { url } => self.inner.get(url),
            QueryRequest::Post { url, body } => self
                .inner
                .post(url)
                .header(CONTENT_TYPE, "application/json")
                .body(body),
        };

        let response = builder.send()?;
        let http_status = response.status();
        // Consumes the response; the connection is released here.
        let body = response.bytes()?;

        let envelope: QueryResponse = serde_json::from_slice(&body).map_err(|e| {
            tracing::debug!(%http_status, error = %e, "response body is not a query envelope");
            PromError::Decode(e)
        })?;

        if !envelope.is_success() {
            tracing::warn!(
                %http_status,
                error_type = %envelope.error_type,
                error = %envelope.error,
                "instant query failed upstream"
            );
            return Err(PromError::Upstream {
                error_type: envelope.error_type,
                error: envelope.error,
            });
        }

        tracing::debug!(
            result_type = %envelope.data.result_type,
            entries = envelope.data.result.len(),
            "instant query succeeded"
        );
        Ok(envelope)
    }

    /// Sends `job` and normalizes the result into uniform records.
    pub fn execute(&self, job: PromJob) -> Result<Vec<ResponseDataSet>, PromError> {
        Ok(self.query(job)?.into_data_set())
    }
}
