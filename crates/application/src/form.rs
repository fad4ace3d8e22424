//! Form-encoded body parsing.

use webapi_domain::{DomainError, DomainResult};

/// Parses doc-string form data into name/value pairs.
///
/// Each line is one or more `name=value` pairs; lines are joined with `&`
/// before URL-decoding, so
///
/// ```text
/// name=Ada
/// lang=en&tz=UTC
/// ```
///
/// yields three pairs. Repeated names are kept, in order.
///
/// # Errors
///
/// Returns `DomainError::InvalidFormBody` if the text cannot be decoded.
pub fn parse_form_data(text: &str) -> DomainResult<Vec<(String, String)>> {
    let joined = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("&");

    serde_urlencoded::from_str(&joined).map_err(|e| DomainError::InvalidFormBody(e.to_string()))
}
