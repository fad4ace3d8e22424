//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! Relative step paths are resolved against the configured base URL.

use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Url};
use tracing::debug;
use webapi_application::ports::{HttpClient, HttpClientError};
use webapi_domain::{HttpMethod, RequestBody, RequestSpec, ResponseSpec};

use crate::config::ClientConfig;

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Wraps a `reqwest::Client` configured from [`ClientConfig`]. One instance
/// is shared by every scenario of a run.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    base_url: Url,
    timeout_ms: u64,
    http_errors: bool,
}

impl ReqwestHttpClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` for a bad base URL, or `Other` if the reqwest
    /// client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, HttpClientError> {
        let base_url = config
            .parsed_base_url()
            .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout_ms: config.timeout_ms,
            http_errors: config.http_errors,
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a step path against the base URL. Absolute URLs pass through.
    fn resolve(&self, url: &str) -> Result<Url, HttpClientError> {
        self.base_url
            .join(url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
            HttpMethod::Trace => Method::TRACE,
            HttpMethod::Connect => Method::CONNECT,
        }
    }

    /// Adds every header value, then the body's implied content type if the
    /// scenario did not set one.
    fn apply_headers(
        mut builder: RequestBuilder,
        request: &RequestSpec,
    ) -> Result<RequestBuilder, HttpClientError> {
        for (name, value) in request.headers.lines() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| HttpClientError::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| HttpClientError::InvalidHeader(format!("{name}: {e}")))?;
            builder = builder.header(name, value);
        }

        if let Some(content_type) = request.body.content_type()
            && !request.headers.contains(CONTENT_TYPE.as_str())
        {
            builder = builder.header(CONTENT_TYPE, content_type);
        }

        Ok(builder)
    }

    /// Encodes the domain `RequestBody` onto the builder.
    fn build_body(
        builder: RequestBuilder,
        body: &RequestBody,
    ) -> Result<RequestBuilder, HttpClientError> {
        match body {
            RequestBody::None => Ok(builder),
            RequestBody::Raw(content) => Ok(builder.body(content.clone())),
            RequestBody::Json(fields) => {
                let bytes = serde_json::to_vec(fields)
                    .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
                Ok(builder.body(bytes))
            }
            RequestBody::Form(fields) => {
                let encoded = serde_urlencoded::to_string(fields)
                    .map_err(|e| HttpClientError::InvalidBody(format!("Invalid form: {e}")))?;
                Ok(builder.body(encoded))
            }
        }
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error_chain(error);
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::Other(format!(
                "more than {MAX_REDIRECTS} redirects: {error}"
            ));
        }

        if error.is_builder() {
            return HttpClientError::InvalidUrl(error.to_string());
        }

        HttpClientError::Other(error_chain(error))
    }
}

// reqwest keeps the useful part (e.g. "Connection refused") in the source chain.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let url = self.resolve(&request.url)?;
        let start = Instant::now();

        let builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);
        let builder = Self::apply_headers(builder, request)?;
        let builder = Self::build_body(builder, &request.body)?;

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
            .to_vec();

        let duration = start.elapsed();
        debug!(status, url = %final_url, ?duration, "response received");

        let response = ResponseSpec::new(status, headers, body, duration).with_url(final_url);
        if self.http_errors && response.status_code().is_error() {
            return Err(HttpClientError::Status(Box::new(response)));
        }
        Ok(response)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use webapi_domain::HeaderSet;

    fn client() -> ReqwestHttpClient {
        ReqwestHttpClient::new(&ClientConfig::with_base_url("http://127.0.0.1:9/api")).unwrap()
    }

    fn built(request: &RequestSpec) -> reqwest::Request {
        let builder = reqwest::Client::new().post("http://127.0.0.1:9/echo");
        let builder = ReqwestHttpClient::apply_headers(builder, request).unwrap();
        ReqwestHttpClient::build_body(builder, &request.body)
            .unwrap()
            .build()
            .unwrap()
    }

    fn body_text(request: &reqwest::Request) -> String {
        let bytes = request.body().and_then(reqwest::Body::as_bytes).unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Patch),
            Method::PATCH
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Trace),
            Method::TRACE
        );
    }

    #[test]
    fn test_relative_paths_resolve_below_base_url() {
        let client = client();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:9/api/");
        assert_eq!(
            client.resolve("echo?x=1").unwrap().as_str(),
            "http://127.0.0.1:9/api/echo?x=1"
        );
        assert_eq!(
            client.resolve("http://example.com/a").unwrap().as_str(),
            "http://example.com/a"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ReqwestHttpClient::new(&ClientConfig::with_base_url("::nope"));
        assert!(matches!(result, Err(HttpClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_multi_valued_headers_are_all_sent() {
        let mut headers = HeaderSet::new();
        headers.add("Accept", "application/json");
        headers.add("Accept", "text/html");
        let request = RequestSpec::new(HttpMethod::Get, "echo").with_headers(headers);

        let built = built(&request);
        let values: Vec<_> = built
            .headers()
            .get_all("accept")
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(values, vec!["application/json", "text/html"]);
    }

    #[test]
    fn test_invalid_header_name() {
        let mut headers = HeaderSet::new();
        headers.add("Bad Header", "x");
        let request = RequestSpec::new(HttpMethod::Get, "echo").with_headers(headers);

        let builder = reqwest::Client::new().get("http://127.0.0.1:9/echo");
        let result = ReqwestHttpClient::apply_headers(builder, &request);
        assert!(matches!(result, Err(HttpClientError::InvalidHeader(_))));
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = RequestSpec::new(HttpMethod::Post, "echo")
            .with_body(RequestBody::json_fields([("name", "Ada")]));

        let built = built(&request);
        assert_eq!(built.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(body_text(&built), r#"{"name":"Ada"}"#);
    }

    #[test]
    fn test_form_body_is_url_encoded() {
        let request = RequestSpec::new(HttpMethod::Post, "echo").with_body(RequestBody::Form(
            vec![
                ("name".to_string(), "Ada Lovelace".to_string()),
                ("lang".to_string(), "en".to_string()),
            ],
        ));

        let built = built(&request);
        assert_eq!(
            built.headers()[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(body_text(&built), "name=Ada+Lovelace&lang=en");
    }

    #[test]
    fn test_explicit_content_type_wins() {
        let mut headers = HeaderSet::new();
        headers.add("content-type", "application/vnd.api+json");
        let request = RequestSpec::new(HttpMethod::Post, "echo")
            .with_headers(headers)
            .with_body(RequestBody::json_fields([("a", "1")]));

        let built = built(&request);
        let values: Vec<_> = built
            .headers()
            .get_all(CONTENT_TYPE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(values, vec!["application/vnd.api+json"]);
    }

    #[test]
    fn test_raw_body_is_verbatim_without_content_type() {
        let request = RequestSpec::new(HttpMethod::Put, "echo")
            .with_body(RequestBody::Raw("plain text".to_string()));

        let built = built(&request);
        assert!(built.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(body_text(&built), "plain text");
    }

    #[tokio::test]
    async fn test_connection_failure_carries_no_response() {
        let request = RequestSpec::new(HttpMethod::Get, "echo");
        let err = client().send(&request).await.unwrap_err();
        assert!(err.response().is_none());
    }
}
