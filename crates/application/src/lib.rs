//! WebApi Application - Scenario adapter and step table
//!
//! This crate holds the per-scenario API context, the assertions it runs on
//! captured responses, and the table that maps step sentences to operations.
//! Network I/O goes through the [`HttpClient`] port.

pub mod assertion;
pub mod auth;
pub mod context;
pub mod error;
pub mod form;
pub mod json;
pub mod ports;
pub mod steps;

pub use context::ApiContext;
pub use error::{JsonSide, MissingState, StepError, StepResult};
pub use ports::{HttpClient, HttpClientError};
pub use steps::{Step, StepArgument, StepKind, StepTable};
