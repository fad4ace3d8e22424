//! HTTP Request domain types

mod body;
mod header;
mod method;
mod spec;

pub use body::{FORM_CONTENT_TYPE, JSON_CONTENT_TYPE, RequestBody};
pub use header::{HeaderSet, HeaderValue};
pub use method::HttpMethod;
pub use spec::RequestSpec;
