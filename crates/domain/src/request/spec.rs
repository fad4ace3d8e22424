//! Request specification type

use std::fmt;

use super::{HeaderSet, HttpMethod, RequestBody};

/// Everything needed to issue one HTTP request.
///
/// The URL is relative to the base URL the HTTP client was configured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Target URL, relative to the client's base URL
    pub url: String,
    /// Headers sent with the request
    pub headers: HeaderSet,
    /// Request body
    pub body: RequestBody,
}

impl RequestSpec {
    /// Creates a request without headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderSet::new(),
            body: RequestBody::None,
        }
    }

    /// Replaces the headers (builder pattern).
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderSet) -> Self {
        self.headers = headers;
        self
    }

    /// Replaces the body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

impl fmt::Display for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
