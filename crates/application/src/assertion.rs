//! Assertion helpers.
//!
//! Each helper returns `Ok(())` when the expectation holds and a
//! `StepError::Assertion` carrying the expected and actual values otherwise.

use std::fmt::Display;

use regex::RegexBuilder;

use crate::error::{MissingState, StepError, StepResult};

/// Bodies longer than this are truncated in failure messages.
const PREVIEW_CHARS: usize = 200;

/// Returns a display-friendly prefix of `text`.
#[must_use]
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Fails unless `expected == actual`.
///
/// # Errors
///
/// Returns an assertion failure naming both values.
pub fn assert_eq<T>(message: &str, expected: &T, actual: &T) -> StepResult
where
    T: PartialEq + Display + ?Sized,
{
    if expected == actual {
        Ok(())
    } else {
        Err(StepError::assertion(message, expected, actual))
    }
}

/// Fails unless `actual >= minimum`.
///
/// # Errors
///
/// Returns an assertion failure naming both values.
pub fn assert_at_least(message: &str, minimum: usize, actual: usize) -> StepResult {
    if actual >= minimum {
        Ok(())
    } else {
        Err(StepError::assertion(message, format!(">= {minimum}"), actual))
    }
}

/// Fails unless `haystack` contains `needle`, ignoring case.
///
/// # Errors
///
/// Returns an assertion failure with a preview of the haystack, or a pattern
/// error if the escaped needle exceeds the regex size limit.
pub fn assert_contains_ignore_case(haystack: &str, needle: &str) -> StepResult {
    let pattern = RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()?;

    if pattern.is_match(haystack) {
        Ok(())
    } else {
        Err(StepError::assertion(
            "response body does not contain the text (case-insensitive)",
            format!("{needle:?}"),
            preview(haystack),
        ))
    }
}

/// Fails if `haystack` contains `needle` (case-sensitive).
///
/// # Errors
///
/// Returns an assertion failure with a preview of the haystack.
pub fn assert_not_contains(haystack: &str, needle: &str) -> StepResult {
    if haystack.contains(needle) {
        Err(StepError::assertion(
            "response body contains text it should not",
            format!("no occurrence of {needle:?}"),
            preview(haystack),
        ))
    } else {
        Ok(())
    }
}

/// Fails unless the key is present.
///
/// # Errors
///
/// Returns an assertion failure naming the missing key.
pub fn assert_key_exists(present: bool, key: &str) -> StepResult {
    if present {
        Ok(())
    } else {
        Err(StepError::assertion(
            "key is missing from the response document",
            format!("key {key:?}"),
            "<missing>",
        ))
    }
}

/// Unwraps state that a step requires.
///
/// # Errors
///
/// Returns `StepError::MissingState` when the value is absent.
pub fn not_null<T>(value: Option<T>, missing: MissingState) -> StepResult<T> {
    value.ok_or(StepError::MissingState(missing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq as pretty_eq;

    #[test]
    fn test_assert_eq() {
        assert!(assert_eq("status", &200, &200).is_ok());
        let err = assert_eq("status", &200, &500).unwrap_err();
        pretty_eq!(err.to_string(), "status\nexpected: 200\n  actual: 500");
    }

    #[test]
    fn test_assert_eq_on_str() {
        assert!(assert_eq("header", "gzip", "gzip").is_ok());
        assert!(assert_eq("header", "gzip", "br").is_err());
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(assert_contains_ignore_case("Hello World", "hello").is_ok());
        assert!(assert_contains_ignore_case("Hello World", "WORLD").is_ok());
        assert!(assert_contains_ignore_case("Hello World", "bye").is_err());
    }

    #[test]
    fn test_contains_treats_needle_literally() {
        assert!(assert_contains_ignore_case("price: $5 (net)", "$5 (net)").is_ok());
        assert!(assert_contains_ignore_case("abc", "a.c").is_err());
    }

    #[test]
    fn test_not_contains_is_case_sensitive() {
        assert!(assert_not_contains("hello world", "world").is_err());
        assert!(assert_not_contains("hello world", "xyz").is_ok());
        assert!(assert_not_contains("hello world", "WORLD").is_ok());
    }

    #[test]
    fn test_at_least() {
        assert!(assert_at_least("keys", 2, 3).is_ok());
        assert!(assert_at_least("keys", 2, 2).is_ok());
        assert!(assert_at_least("keys", 3, 2).is_err());
    }

    #[test]
    fn test_not_null() {
        assert_eq!(not_null(Some(5), MissingState::NoResponse).ok(), Some(5));
        assert!(matches!(
            not_null::<u8>(None, MissingState::NoResponse),
            Err(StepError::MissingState(MissingState::NoResponse))
        ));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(PREVIEW_CHARS + 10);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        pretty_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
        pretty_eq!(preview("short"), "short");
    }
}
