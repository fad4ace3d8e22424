//! HTTP Response domain types

mod spec;
mod status;

pub use spec::ResponseSpec;
pub use status::StatusCode;
