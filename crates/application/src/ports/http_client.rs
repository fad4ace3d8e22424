//! HTTP Client port

use std::future::Future;

use thiserror::Error;
use webapi_domain::{RequestSpec, ResponseSpec};

/// Errors surfaced by an `HttpClient`.
///
/// `Status` is the only variant that carries a response: the exchange
/// completed but the server answered with an error status. Every other
/// variant means no response is available.
#[derive(Debug, Clone, Error)]
pub enum HttpClientError {
    /// The server answered with a 4xx or 5xx status.
    #[error("HTTP {} {}", .0.status, .0.status_text)]
    Status(Box<ResponseSpec>),

    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("could not resolve host {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying error message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established or was dropped.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The URL could not be resolved against the base URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value could not be encoded.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Returns the response attached to the error, if any.
    #[must_use]
    pub fn response(&self) -> Option<&ResponseSpec> {
        match self {
            Self::Status(response) => Some(response),
            _ => None,
        }
    }

    /// Consumes the error, returning the attached response or the error itself.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged when no response is attached.
    pub fn into_response(self) -> Result<ResponseSpec, Self> {
        match self {
            Self::Status(response) => Ok(*response),
            other => Err(other),
        }
    }
}

/// Port for sending HTTP requests.
///
/// Implementations resolve `RequestSpec::url` against their own base URL and
/// own any timeout policy. A single instance is reused sequentially across
/// many scenarios.
pub trait HttpClient: Send + Sync {
    /// Sends a request and waits for the complete response.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientError::Status` when the server answers with an
    /// error status the client is configured to reject, and another variant
    /// for transport failures.
    fn send(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send;
}
