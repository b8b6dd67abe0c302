use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{PromError, ValidationError, Violation};

/// API version prefix appended to the endpoint.
pub const VERSION_V1: &str = "/api/v1";
/// Path of the instant-query API below the version prefix.
pub const QUERY_API: &str = "/query";

/// # Query Method
///
/// The only two HTTP methods the instant-query API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryMethod {
    /// Query passed in the URL query string.
    Get,
    /// Query passed as a JSON body.
    Post,
}

impl QueryMethod {
    /// The wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMethod::Get => "GET",
            QueryMethod::Post => "POST",
        }
    }
}

impl fmt::Display for QueryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryMethod {
    type Err = PromError;

    /// Matches exactly `GET` or `POST`; anything else, including the lowercase
    /// spellings and the empty string, is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(QueryMethod::Get),
            "POST" => Ok(QueryMethod::Post),
            other => Err(PromError::MethodNotAllowed(other.to_string())),
        }
    }
}

/// # Prom Job
///
/// An immutable, validated instant-query request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromJob {
    endpoint: String,
    query: String,
    method: QueryMethod,
    api: String,
    version: String,
}

impl PromJob {
    /// Creates a job from a raw method name.
    ///
    /// The method is checked first: anything other than `GET` or `POST` fails
    /// with [`PromError::MethodNotAllowed`] before the remaining fields are
    /// looked at.
    ///
    /// # Errors
    /// `MethodNotAllowed` for a bad method, `Validation` listing every broken
    /// field rule otherwise.
    pub fn new(endpoint: &str, query: &str, method: &str) -> Result<Self, PromError> {
        let method: QueryMethod = method.parse()?;
        Self::with_method(endpoint, query, method)
    }

    /// Creates a job from an already typed method.
    pub fn with_method(endpoint: &str, query: &str, method: QueryMethod) -> Result<Self, PromError> {
        let job = Self {
            endpoint: endpoint.to_string(),
            query: query.to_string(),
            method,
            api: QUERY_API.to_string(),
            version: VERSION_V1.to_string(),
        };
        job.validate()?;
        Ok(job)
    }

    /// Checks every field rule and reports all failures at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        if self.endpoint.is_empty() {
            violations.push(Violation { field: "endpoint", rule: "required" });
        } else if !is_valid_url(&self.endpoint) {
            violations.push(Violation { field: "endpoint", rule: "url" });
        }
        if self.query.is_empty() {
            violations.push(Violation { field: "query", rule: "required" });
        }
        if self.api.is_empty() {
            violations.push(Violation { field: "api", rule: "required" });
        }
        if self.version.is_empty() {
            violations.push(Violation { field: "version", rule: "required" });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }

    /// Base URL of the backend, exactly as given.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The query expression, unencoded.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// HTTP method the executor will use.
    pub fn method(&self) -> QueryMethod {
        self.method
    }

    /// API path below the version prefix.
    pub fn api(&self) -> &str {
        &self.api
    }

    /// Version prefix.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// `endpoint + version + api`, without any query string.
    pub fn url(&self) -> String {
        format!("{}{}{}", self.endpoint, self.version, self.api)
    }
}

// An absolute URL with a host; relative paths and `mailto:`-style URLs fail.
fn is_valid_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}
