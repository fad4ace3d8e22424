//! HTTP client configuration
//!
//! Defaults are overlaid by `WEBAPI_`-prefixed environment variables, for
//! example `WEBAPI_BASE_URL=http://127.0.0.1:9000/`.

use config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Prefix of the environment variables read by [`ClientConfig::load`].
pub const ENV_PREFIX: &str = "WEBAPI";

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Errors raised while loading the client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load client configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The base URL is not an absolute URL.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// Configured value.
        url: String,
        /// Parser error.
        source: url::ParseError,
    },
}

/// Settings for the reqwest-backed HTTP client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Base URL relative step paths are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// `User-Agent` sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Report 4xx/5xx responses as `HttpClientError::Status`.
    #[serde(default = "default_true")]
    pub http_errors: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_user_agent() -> String {
    format!("webapi/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_true() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            http_errors: default_true(),
        }
    }
}

impl ClientConfig {
    /// Loads defaults overlaid by `WEBAPI_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a variable has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads defaults overlaid by the given environment source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a variable has the wrong type.
    pub fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(environment.prefix_separator("_").try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Returns the default configuration with another base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parses the base URL, adding a trailing slash so relative paths are
    /// joined below it rather than replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the value is not absolute.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_environment(environment(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:8080/");
        assert_eq!(config.timeout_ms, 30_000);
        assert!(config.user_agent.starts_with("webapi/"));
        assert!(config.http_errors);
    }

    #[test]
    fn test_environment_overrides() {
        let config = ClientConfig::from_environment(environment(&[
            ("WEBAPI_BASE_URL", "http://127.0.0.1:9000/api"),
            ("WEBAPI_TIMEOUT_MS", "500"),
            ("WEBAPI_HTTP_ERRORS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.timeout_ms, 500);
        assert!(!config.http_errors);
    }

    #[test]
    fn test_wrong_type_is_load_error() {
        let err =
            ClientConfig::from_environment(environment(&[("WEBAPI_TIMEOUT_MS", "soon")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_parsed_base_url_adds_trailing_slash() {
        let url = ClientConfig::with_base_url("http://localhost:9000/api")
            .parsed_base_url()
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/");
        assert_eq!(url.join("echo").unwrap().as_str(), "http://localhost:9000/api/echo");
    }

    #[test]
    fn test_relative_base_url_is_rejected() {
        let err = ClientConfig::with_base_url("not a url")
            .parsed_base_url()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }
}
