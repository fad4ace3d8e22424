//! Response specification type
//!
//! A captured HTTP response: status, every header line in the order it was
//! received, the body, and how long the exchange took.

use std::time::Duration;

use super::StatusCode;

/// HTTP response captured after a send.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase (e.g., "OK", "Not Found").
    pub status_text: String,
    /// Final URL of the exchange, when the client knows it.
    pub url: Option<String>,
    /// Response header lines; a header received twice appears twice.
    pub headers: Vec<(String, String)>,
    /// Response body as text (lossy UTF-8).
    pub body: String,
    /// Time between sending the request and reading the full body.
    pub duration: Duration,
}

impl ResponseSpec {
    /// Creates a new `ResponseSpec` from raw response data.
    #[must_use]
    pub fn new(
        status: u16,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        Self {
            status,
            status_text: StatusCode::new(status).reason_phrase().to_string(),
            url: None,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
            duration,
        }
    }

    /// Sets the final URL (builder pattern).
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Returns the status as a `StatusCode`.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Returns every value received for a header (case-insensitive).
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns all values of a header joined with `", "`.
    ///
    /// A missing header yields an empty string.
    #[must_use]
    pub fn header_line(&self, name: &str) -> String {
        self.header_values(name).collect::<Vec<_>>().join(", ")
    }
}
