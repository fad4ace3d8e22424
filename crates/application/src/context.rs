//! Scenario adapter.
//!
//! `ApiContext` holds the state of one scenario (pending headers,
//! placeholders, the last request and response) and exposes one method per
//! step sentence. A fresh context is created for every scenario.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};
use webapi_domain::{
    HeaderSet, HttpMethod, Placeholders, RequestBody, RequestSpec, ResponseSpec,
};

use crate::assertion::{self, not_null};
use crate::auth::{AUTHORIZATION, basic_authorization, basic_credentials};
use crate::error::{MissingState, StepResult};
use crate::form::parse_form_data;
use crate::json::assert_contains_json;
use crate::ports::HttpClient;

/// Per-scenario state and step operations.
pub struct ApiContext<C: HttpClient> {
    client: Option<Arc<C>>,
    headers: HeaderSet,
    placeholders: Placeholders,
    authorization: Option<String>,
    request: Option<RequestSpec>,
    response: Option<ResponseSpec>,
}

impl<C: HttpClient> ApiContext<C> {
    /// Creates a context with no client; sends fail until one is set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            client: None,
            headers: HeaderSet::new(),
            placeholders: Placeholders::new(),
            authorization: None,
            request: None,
            response: None,
        }
    }

    /// Creates a context that sends through `client`.
    #[must_use]
    pub fn with_client(client: Arc<C>) -> Self {
        Self {
            client: Some(client),
            ..Self::new()
        }
    }

    /// Injects the HTTP client.
    pub fn set_client(&mut self, client: Arc<C>) {
        self.client = Some(client);
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    /// Adds Basic authentication to every following request.
    ///
    /// Any `Authorization` header set before is dropped.
    pub fn authenticate_as(&mut self, username: &str, password: &str) {
        self.headers.remove(AUTHORIZATION);
        let credentials = basic_credentials(username, password);
        self.headers
            .add(AUTHORIZATION, basic_authorization(&credentials));
        debug!(username, "basic authentication set");
        self.authorization = Some(credentials);
    }

    /// Adds a header to every following request.
    ///
    /// Setting a name again appends a value instead of replacing it.
    pub fn set_header(&mut self, name: &str, value: &str) {
        debug!(name, value, "header set");
        self.headers.add(name, value);
    }

    /// Removes a pending header.
    pub fn remove_header(&mut self, name: &str) {
        self.headers.remove(name);
    }

    /// Registers a placeholder applied to URLs and bodies before sending.
    pub fn set_placeholder(&mut self, token: &str, value: &str) {
        self.placeholders.set(token, value);
    }

    /// Applies every registered placeholder to `text`.
    #[must_use]
    pub fn replace_placeholders(&self, text: &str) -> String {
        self.placeholders.replace(text)
    }

    /// Pending request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    /// Base64 credentials from the last `authenticate_as`.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    /// The last request sent, if any.
    #[must_use]
    pub const fn request(&self) -> Option<&RequestSpec> {
        self.request.as_ref()
    }

    /// The last response captured.
    ///
    /// # Errors
    ///
    /// Returns `MissingState::NoResponse` before the first send.
    pub fn response(&self) -> StepResult<&ResponseSpec> {
        not_null(self.response.as_ref(), MissingState::NoResponse)
    }

    // ------------------------------------------------------------------
    // Sending
    // ------------------------------------------------------------------

    /// Sends a request without a body.
    ///
    /// # Errors
    ///
    /// Fails when no client is set or the transport fails without a response.
    pub async fn send_request(&mut self, method: HttpMethod, url: &str) -> StepResult {
        self.send(method, url, RequestBody::None).await
    }

    /// Sends table fields as a JSON object body.
    ///
    /// Placeholders are applied to each value.
    ///
    /// # Errors
    ///
    /// Fails when no client is set or the transport fails without a response.
    pub async fn send_request_with_values(
        &mut self,
        method: HttpMethod,
        url: &str,
        fields: &[(String, String)],
    ) -> StepResult {
        let body = RequestBody::json_fields(
            fields
                .iter()
                .map(|(key, value)| (key.clone(), self.placeholders.replace(value))),
        );
        self.send(method, url, body).await
    }

    /// Sends text verbatim as the body, trimmed and with placeholders applied.
    ///
    /// # Errors
    ///
    /// Fails when no client is set or the transport fails without a response.
    pub async fn send_request_with_body(
        &mut self,
        method: HttpMethod,
        url: &str,
        body: &str,
    ) -> StepResult {
        let body = self.placeholders.replace(body.trim());
        self.send(method, url, RequestBody::Raw(body)).await
    }

    /// Sends URL-encoded form fields parsed from doc-string lines.
    ///
    /// # Errors
    ///
    /// Fails when the form text cannot be decoded, when no client is set, or
    /// when the transport fails without a response.
    pub async fn send_request_with_form_data(
        &mut self,
        method: HttpMethod,
        url: &str,
        body: &str,
    ) -> StepResult {
        let fields = parse_form_data(&self.placeholders.replace(body.trim()))?;
        self.send(method, url, RequestBody::Form(fields)).await
    }

    async fn send(&mut self, method: HttpMethod, url: &str, body: RequestBody) -> StepResult {
        let client = not_null(self.client.clone(), MissingState::ClientNotConfigured)?;
        let request = RequestSpec::new(method, self.prepare_url(url))
            .with_headers(self.headers.clone())
            .with_body(body);

        debug!(%request, headers = self.headers.len(), "sending request");
        let outcome = client.send(&request).await;
        self.request = Some(request);

        let response = match outcome {
            Ok(response) => response,
            Err(error) => match error.into_response() {
                Ok(response) => {
                    warn!(status = response.status, "capturing error response");
                    response
                }
                Err(error) => {
                    self.response = None;
                    return Err(error.into());
                }
            },
        };

        debug!(status = response.status, elapsed = ?response.duration, "response captured");
        self.response = Some(response);
        Ok(())
    }

    fn prepare_url(&self, url: &str) -> String {
        self.placeholders
            .replace(url)
            .trim_start_matches('/')
            .to_string()
    }

    // ------------------------------------------------------------------
    // Assertions
    // ------------------------------------------------------------------

    /// Checks the status code of the last response.
    ///
    /// # Errors
    ///
    /// Fails on mismatch or before the first send.
    pub fn assert_status(&self, expected: u16) -> StepResult {
        let actual = self.response()?.status;
        assertion::assert_eq("unexpected response code", &expected, &actual)
    }

    /// Checks that the body contains `text`, ignoring case.
    ///
    /// # Errors
    ///
    /// Fails when the text is absent or before the first send.
    pub fn assert_body_contains(&self, text: &str) -> StepResult {
        assertion::assert_contains_ignore_case(&self.response()?.body, text)
    }

    /// Checks that the body does not contain `text` (case-sensitive).
    ///
    /// # Errors
    ///
    /// Fails when the text is present or before the first send.
    pub fn assert_body_not_contains(&self, text: &str) -> StepResult {
        assertion::assert_not_contains(&self.response()?.body, text)
    }

    /// Checks that the body is a JSON document containing the etalon's
    /// top-level entries. Placeholders are applied to the etalon.
    ///
    /// # Errors
    ///
    /// Fails when either side is not JSON, on a missing or differing entry,
    /// or before the first send.
    pub fn assert_body_contains_json(&self, etalon: &str) -> StepResult {
        let response = self.response()?;
        assert_contains_json(&response.body, &self.placeholders.replace(etalon))
    }

    /// Checks a response header's combined value.
    ///
    /// # Errors
    ///
    /// Fails on mismatch or before the first send.
    pub fn assert_header(&self, name: &str, expected: &str) -> StepResult {
        let actual = self.response()?.header_line(name);
        assertion::assert_eq(
            &format!("unexpected value for response header {name:?}"),
            expected,
            actual.as_str(),
        )
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    /// Renders the last exchange as `METHOD URL => STATUS:\nBODY`.
    ///
    /// # Errors
    ///
    /// Fails before the first send.
    pub fn describe_response(&self) -> StepResult<String> {
        let response = self.response()?;
        let request = self.request.as_ref().map_or_else(String::new, |request| {
            let url = response.url.as_deref().unwrap_or(&request.url);
            format!("{} {url} => ", request.method)
        });
        Ok(format!("{request}{}:\n{}", response.status, response.body))
    }

    /// Writes the last exchange to standard output.
    ///
    /// # Errors
    ///
    /// Fails before the first send.
    pub fn print_response(&self) -> StepResult {
        let description = self.describe_response()?;
        println!("{description}");
        Ok(())
    }
}

impl<C: HttpClient> Default for ApiContext<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HttpClient> fmt::Debug for ApiContext<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiContext")
            .field("client", &self.client.as_ref().map(|_| "HttpClient"))
            .field("headers", &self.headers)
            .field("placeholders", &self.placeholders)
            .field("request", &self.request)
            .field("response", &self.response.as_ref().map(|r| r.status))
            .finish_non_exhaustive()
    }
}
