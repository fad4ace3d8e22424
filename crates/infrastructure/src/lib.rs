//! WebApi Infrastructure - Adapters and implementations
//!
//! This crate provides the reqwest implementation of the `HttpClient` port
//! defined in the application layer, its configuration, and tracing setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use crate::config::{ClientConfig, ConfigError};
pub use adapters::ReqwestHttpClient;
pub use telemetry::init_tracing;
