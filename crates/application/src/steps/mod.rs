//! Step sentences.
//!
//! Scenario sentences are resolved against an explicit table of patterns,
//! each mapped to one [`StepKind`]. Parsing yields a typed [`Step`] that the
//! adapter executes with [`ApiContext::run`](crate::ApiContext::run).

mod run;
mod table;

pub use table::StepTable;

use webapi_domain::HttpMethod;

/// Multi-line argument attached to a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepArgument {
    /// Text block between triple quotes.
    DocString(String),
    /// Table rows, each a list of cells.
    Table(Vec<Vec<String>>),
}

/// Operation a sentence pattern maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// `I am authenticating as "<user>" with "<pass>" password`
    AuthenticateAs,
    /// `I set header "<name>" with value "<value>"`
    SetHeader,
    /// `I set placeholder "<token>" with value "<value>"`
    SetPlaceholder,
    /// `I send a <METHOD> request to "<path>"`
    Send,
    /// `I send a <METHOD> request to "<path>" with values:`
    SendWithValues,
    /// `I send a <METHOD> request to "<path>" with body:`
    SendWithBody,
    /// `I send a <METHOD> request to "<path>" with form data:`
    SendWithFormData,
    /// `the response code should be <code>`
    ResponseCode,
    /// `the response should contain "<text>"`
    ResponseContains,
    /// `the response should not contain "<text>"`
    ResponseNotContains,
    /// `the response should contain json:`
    ResponseContainsJson,
    /// `the response "<name>" header should be "<value>"`
    ResponseHeader,
    /// `print response`
    PrintResponse,
}

impl StepKind {
    /// Argument the sentence requires, if any.
    #[must_use]
    pub const fn expected_argument(self) -> Option<&'static str> {
        match self {
            Self::SendWithValues => Some("a table"),
            Self::SendWithBody | Self::SendWithFormData | Self::ResponseContainsJson => {
                Some("a doc string")
            }
            _ => None,
        }
    }
}

/// A parsed step, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Use Basic authentication for following requests.
    AuthenticateAs {
        /// User name.
        username: String,
        /// Password.
        password: String,
    },
    /// Add a request header.
    SetHeader {
        /// Header name.
        name: String,
        /// Header value.
        value: String,
    },
    /// Register a placeholder.
    SetPlaceholder {
        /// Literal text to replace.
        token: String,
        /// Replacement.
        value: String,
    },
    /// Send a request without a body.
    Send {
        /// Request method.
        method: HttpMethod,
        /// Path relative to the base URL.
        url: String,
    },
    /// Send table fields as a JSON object.
    SendWithValues {
        /// Request method.
        method: HttpMethod,
        /// Path relative to the base URL.
        url: String,
        /// Field names and values in table order.
        fields: Vec<(String, String)>,
    },
    /// Send a raw body.
    SendWithBody {
        /// Request method.
        method: HttpMethod,
        /// Path relative to the base URL.
        url: String,
        /// Body text.
        body: String,
    },
    /// Send a URL-encoded form.
    SendWithFormData {
        /// Request method.
        method: HttpMethod,
        /// Path relative to the base URL.
        url: String,
        /// Form lines.
        body: String,
    },
    /// Check the status code.
    ResponseCode(u16),
    /// Check the body contains text, ignoring case.
    ResponseContains(String),
    /// Check the body does not contain text.
    ResponseNotContains(String),
    /// Check the body contains a JSON etalon.
    ResponseContainsJson(String),
    /// Check a response header.
    ResponseHeader {
        /// Header name.
        name: String,
        /// Expected combined value.
        value: String,
    },
    /// Print the last exchange.
    PrintResponse,
}

impl Step {
    /// Returns the kind of this step.
    #[must_use]
    pub const fn kind(&self) -> StepKind {
        match self {
            Self::AuthenticateAs { .. } => StepKind::AuthenticateAs,
            Self::SetHeader { .. } => StepKind::SetHeader,
            Self::SetPlaceholder { .. } => StepKind::SetPlaceholder,
            Self::Send { .. } => StepKind::Send,
            Self::SendWithValues { .. } => StepKind::SendWithValues,
            Self::SendWithBody { .. } => StepKind::SendWithBody,
            Self::SendWithFormData { .. } => StepKind::SendWithFormData,
            Self::ResponseCode(_) => StepKind::ResponseCode,
            Self::ResponseContains(_) => StepKind::ResponseContains,
            Self::ResponseNotContains(_) => StepKind::ResponseNotContains,
            Self::ResponseContainsJson(_) => StepKind::ResponseContainsJson,
            Self::ResponseHeader { .. } => StepKind::ResponseHeader,
            Self::PrintResponse => StepKind::PrintResponse,
        }
    }
}
