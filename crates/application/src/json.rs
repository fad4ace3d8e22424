//! JSON subset matching.
//!
//! The response body contains the etalon when, at the top level, every entry
//! of the etalon exists in the actual document with an equal value. Extra
//! entries in the response are allowed. Nested values are compared whole: an
//! object nested under a key must equal the etalon's object exactly (key order
//! aside), and arrays must match element for element.

use serde_json::Value;

use crate::assertion::{assert_at_least, assert_key_exists};
use crate::error::{JsonSide, StepError, StepResult};

/// Parses a document that must be a JSON object or array.
///
/// # Errors
///
/// Returns `StepError::JsonParse` naming `side` for invalid JSON and for
/// scalars or `null`.
pub fn parse_container(text: &str, side: JsonSide) -> StepResult<Value> {
    let value: Value = serde_json::from_str(text).map_err(|e| StepError::JsonParse {
        side,
        reason: e.to_string(),
        body: text.to_string(),
    })?;

    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(StepError::JsonParse {
            side,
            reason: format!("expected an object or array, got {}", kind(&other)),
            body: text.to_string(),
        }),
    }
}

/// Checks that `actual_text` contains every top-level entry of `etalon_text`.
///
/// The etalon is parsed first, so an invalid etalon is reported even when the
/// response body is also invalid.
///
/// # Errors
///
/// Returns `StepError::JsonParse` when either document is not a JSON
/// container, and `StepError::Assertion` when an entry is missing or differs.
pub fn assert_contains_json(actual_text: &str, etalon_text: &str) -> StepResult {
    let etalon = parse_container(etalon_text, JsonSide::Etalon)?;
    let actual = parse_container(actual_text, JsonSide::Actual)?;
    assert_subset(&actual, &etalon)
}

/// Checks that `actual` contains every top-level entry of `etalon`.
///
/// Arrays are read as index-keyed entries (`"0"`, `"1"`, ...), so an array
/// etalon can match an object with positional keys and the other way round.
///
/// # Errors
///
/// Returns `StepError::Assertion` on the first missing or differing entry.
pub fn assert_subset(actual: &Value, etalon: &Value) -> StepResult {
    let expected = entries(etalon);
    assert_at_least(
        "response document has fewer top-level entries than expected",
        expected.len(),
        entries(actual).len(),
    )?;

    for (key, value) in expected {
        let found = lookup(actual, &key);
        assert_key_exists(found.is_some(), &key)?;
        assert_entry(&key, value, found.unwrap_or(&Value::Null))?;
    }
    Ok(())
}

/// Deep equality where numbers compare by numeric value.
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                a == b
            } else if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                a == b
            } else {
                a.as_f64() == b.as_f64()
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => left == right,
    }
}

fn assert_entry(key: &str, expected: &Value, actual: &Value) -> StepResult {
    if values_equal(expected, actual) {
        Ok(())
    } else {
        Err(StepError::assertion(
            format!("value of {key:?} differs"),
            expected,
            actual,
        ))
    }
}

fn entries(value: &Value) -> Vec<(String, &Value)> {
    match value {
        Value::Object(map) => map.iter().map(|(key, item)| (key.clone(), item)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        _ => Vec::new(),
    }
}

fn lookup<'a>(container: &'a Value, key: &str) -> Option<&'a Value> {
    match container {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
