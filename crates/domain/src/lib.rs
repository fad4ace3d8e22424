//! WebApi Domain - Core types
//!
//! This crate defines the data model shared by the scenario adapter and the
//! HTTP client adapters: requests, responses, headers and placeholders.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod placeholder;
pub mod request;
pub mod response;

pub use error::{DomainError, DomainResult};
pub use placeholder::Placeholders;
pub use request::{HeaderSet, HeaderValue, HttpMethod, RequestBody, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
