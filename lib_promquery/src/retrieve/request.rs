use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::errors::PromError;
use crate::job::{PromJob, QueryMethod};

/// JSON body of a POST instant query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPost {
    /// The query expression.
    pub query: String,
}

/// # Query Request
///
/// The fully built HTTP request for a job, before it touches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryRequest {
    /// `GET {endpoint}{version}{api}?query={query}`
    Get {
        /// Full URL including the query string.
        url: String,
    },
    /// `POST {endpoint}{version}{api}` with a JSON body.
    Post {
        /// Target URL.
        url: String,
        /// Serialized [`QueryPost`].
        body: String,
    },
}

impl QueryRequest {
    /// Builds the request for `job`.
    ///
    /// With `encode_query` off the query is appended to the GET URL exactly as
    /// given, so characters such as `&`, `=` or `#` change the meaning of the
    /// URL. Turn it on to percent-encode the query.
    pub fn from_job(job: &PromJob, encode_query: bool) -> Result<Self, PromError> {
        let base = job.url();
        match job.method() {
            QueryMethod::Get => {
                let query = if encode_query {
                    form_urlencoded::byte_serialize(job.query().as_bytes()).collect::<String>()
                } else {
                    job.query().to_string()
                };
                Ok(QueryRequest::Get {
                    url: format!("{}?query={}", base, query),
                })
            }
            QueryMethod::Post => {
                let body = serde_json::to_string(&QueryPost {
                    query: job.query().to_string(),
                })?;
                Ok(QueryRequest::Post { url: base, body })
            }
        }
    }

    /// HTTP method of the request.
    pub fn method(&self) -> QueryMethod {
        match self {
            QueryRequest::Get { .. } => QueryMethod::Get,
            QueryRequest::Post { .. } => QueryMethod::Post,
        }
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        match self {
            QueryRequest::Get { url } | QueryRequest::Post { url, .. } => url,
        }
    }

    /// JSON body, for POST requests.
    pub fn body(&self) -> Option<&str> {
        match self {
            QueryRequest::Get { .. } => None,
            QueryRequest::Post { body, .. } => Some(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_url_is_verbatim() {
        let query = r#"sum(rate(http_requests_total{code="200"}[5m])) by (job)"#;
        let job = PromJob::new("http://prom:9090", query, "GET").unwrap();
        let req = QueryRequest::from_job(&job, false).unwrap();
        assert_eq!(req.method(), QueryMethod::Get);
        assert_eq!(req.url(), format!("http://prom:9090/api/v1/query?query={}", query));
        assert_eq!(req.body(), None);
    }

    #[test]
    fn test_get_url_encoded_on_request() {
        let job = PromJob::new("http://prom:9090", "a & b = c", "GET").unwrap();
        let req = QueryRequest::from_job(&job, true).unwrap();
        assert_eq!(req.url(), "http://prom:9090/api/v1/query?query=a+%26+b+%3D+c");
    }

    #[test]
    fn test_post_body_is_exact_json() {
        let job = PromJob::new("http://prom:9090", "up", "POST").unwrap();
        let req = QueryRequest::from_job(&job, false).unwrap();
        assert_eq!(req.method(), QueryMethod::Post);
        assert_eq!(req.url(), "http://prom:9090/api/v1/query");
        assert_eq!(req.body(), Some(r#"{"query":"up"}"#));
    }

    #[test]
    fn test_post_body_escapes_quotes() {
        let job = PromJob::new("http://prom:9090", r#"up{job="node"}"#, "POST").unwrap();
        let req = QueryRequest::from_job(&job, true).unwrap();
        assert_eq!(req.body(), Some(r#"{"query":"up{job=\"node\"}"}"#));
    }
}
