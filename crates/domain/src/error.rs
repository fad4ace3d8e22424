//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while building requests or reading responses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A form body could not be decoded.
    #[error("invalid form body: {0}")]
    InvalidFormBody(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
