//! Step error types
//!
//! Every operation on the scenario adapter returns `StepResult`. The error
//! variants follow the failure categories a scenario can hit: an assertion
//! that did not hold, a step run before the state it needs exists, a body
//! that should be JSON but is not, and a transport failure with no response.

use std::fmt;

use thiserror::Error;
use webapi_domain::DomainError;

use crate::ports::HttpClientError;

/// Which document in a JSON comparison could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonSide {
    /// The expected document written in the scenario.
    Etalon,
    /// The response body.
    Actual,
}

impl fmt::Display for JsonSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Etalon => f.write_str("etalon"),
            Self::Actual => f.write_str("actual"),
        }
    }
}

/// State a step needed but that does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingState {
    /// No response has been captured in this scenario.
    NoResponse,
    /// No HTTP client was injected into the adapter.
    ClientNotConfigured,
}

impl fmt::Display for MissingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResponse => f.write_str("no response has been received yet"),
            Self::ClientNotConfigured => f.write_str("client has not been set in the API context"),
        }
    }
}

/// Errors raised by scenario steps.
#[derive(Debug, Error)]
pub enum StepError {
    /// An expectation did not hold.
    #[error("{message}\nexpected: {expected}\n  actual: {actual}")]
    Assertion {
        /// What was being checked.
        message: String,
        /// Expected value, rendered for display.
        expected: String,
        /// Actual value, rendered for display.
        actual: String,
    },

    /// The step ran before the state it reads was available.
    #[error("{0}")]
    MissingState(MissingState),

    /// A document expected to be a JSON object or array was not.
    #[error("can not convert {side} to json: {reason}\n{body}")]
    JsonParse {
        /// Which document failed.
        side: JsonSide,
        /// Parser message.
        reason: String,
        /// Offending text.
        body: String,
    },

    /// The request failed without producing a response.
    #[error("transport error: {0}")]
    Transport(#[from] HttpClientError),

    /// No pattern in the step table matches the sentence.
    #[error("undefined step: {0:?}")]
    UndefinedStep(String),

    /// The sentence needs a doc string or table that was not given.
    #[error("step {step:?} expects {expected}")]
    MissingArgument {
        /// Sentence text.
        step: String,
        /// Description of the missing argument.
        expected: &'static str,
    },

    /// An argument was given but could not be used.
    #[error("invalid argument for step {step:?}: {message}")]
    InvalidArgument {
        /// Sentence text.
        step: String,
        /// What was wrong with it.
        message: String,
    },

    /// A domain value could not be built.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A step pattern failed to compile.
    #[error("invalid step pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl StepError {
    /// Builds an assertion failure.
    pub fn assertion(
        message: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        Self::Assertion {
            message: message.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Returns true for assertion failures.
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(self, Self::Assertion { .. })
    }
}

impl From<MissingState> for StepError {
    fn from(state: MissingState) -> Self {
        Self::MissingState(state)
    }
}

/// Result type alias for step operations.
pub type StepResult<T = ()> = Result<T, StepError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_assertion_message_shows_both_values() {
        let err = StepError::assertion("status code mismatch", 200, 404);
        assert_eq!(
            err.to_string(),
            "status code mismatch\nexpected: 200\n  actual: 404"
        );
        assert!(err.is_assertion());
    }

    #[test]
    fn test_json_parse_names_the_side() {
        let err = StepError::JsonParse {
            side: JsonSide::Actual,
            reason: "expected value at line 1 column 1".to_string(),
            body: "<html>".to_string(),
        };
        assert!(err.to_string().starts_with("can not convert actual to json"));
    }

    #[test]
    fn test_missing_state_display() {
        let err = StepError::from(MissingState::ClientNotConfigured);
        assert_eq!(err.to_string(), "client has not been set in the API context");
    }
}
