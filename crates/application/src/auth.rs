//! HTTP Basic authentication.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Header carrying request credentials.
pub const AUTHORIZATION: &str = "Authorization";

/// Encodes `username:password` as standard base64.
#[must_use]
pub fn basic_credentials(username: &str, password: &str) -> String {
    STANDARD.encode(format!("{username}:{password}"))
}

/// Formats a complete `Authorization` header value for Basic auth.
#[must_use]
pub fn basic_authorization(credentials: &str) -> String {
    format!("Basic {credentials}")
}
