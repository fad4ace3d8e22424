//! HTTP Header types
//!
//! Pending request headers are kept as an ordered set where each name maps to
//! either a single value or an ordered list of values. Names compare
//! case-insensitively, as HTTP requires.

/// Value stored for one header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    /// A header set exactly once.
    Single(String),
    /// A header set several times, in the order the values were added.
    Multiple(Vec<String>),
}

impl HeaderValue {
    /// Appends a value, turning a single value into a list.
    pub fn push(&mut self, value: impl Into<String>) {
        match self {
            Self::Single(first) => {
                let first = std::mem::take(first);
                *self = Self::Multiple(vec![first, value.into()]);
            }
            Self::Multiple(values) => values.push(value.into()),
        }
    }

    /// Returns every value as a slice-like iterator.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multiple(values) => values,
        };
        values.iter().map(String::as_str)
    }
}

/// Ordered collection of pending request headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, HeaderValue)>,
}

impl HeaderSet {
    /// Creates an empty header set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a header value.
    ///
    /// A name seen for the first time stores a single value; every further
    /// value for the same name is appended to a list.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if let Some((_, existing)) = self.entry_mut(&name) {
            existing.push(value);
        } else {
            self.entries.push((name, HeaderValue::Single(value.into())));
        }
    }

    /// Removes a header and returns its value, if it was present.
    pub fn remove(&mut self, name: &str) -> Option<HeaderValue> {
        let index = self
            .entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(index).1)
    }

    /// Returns the value stored for a header name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Returns true if a header with this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over one `(name, value)` pair per stored value.
    pub fn lines(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(name, value)| value.values().map(move |v| (name.as_str(), v)))
    }

    /// Returns the number of distinct header names.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut (String, HeaderValue)> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_value_is_single() {
        let mut headers = HeaderSet::new();
        headers.add("Accept", "application/json");

        assert_eq!(
            headers.get("Accept"),
            Some(&HeaderValue::Single("application/json".to_string()))
        );
    }

    #[test]
    fn test_second_value_becomes_ordered_list() {
        let mut headers = HeaderSet::new();
        headers.add("X-Trace", "first");
        headers.add("x-trace", "second");
        headers.add("X-TRACE", "third");

        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.get("X-Trace"),
            Some(&HeaderValue::Multiple(vec![
                "first".to_string(),
                "second".to_string(),
                "third".to_string(),
            ]))
        );
    }

    #[test]
    fn test_remove_is_case_insensitive() {
        let mut headers = HeaderSet::new();
        headers.add("Authorization", "Basic abc");
        headers.add("Accept", "text/plain");

        assert!(headers.remove("authorization").is_some());
        assert!(!headers.contains("Authorization"));
        assert!(headers.remove("Authorization").is_none());
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_lines_flatten_values_in_order() {
        let mut headers = HeaderSet::new();
        headers.add("Accept", "a");
        headers.add("X-Id", "1");
        headers.add("Accept", "b");

        let lines: Vec<_> = headers.lines().collect();
        assert_eq!(lines, vec![("Accept", "a"), ("Accept", "b"), ("X-Id", "1")]);
    }

    #[test]
    fn test_push_keeps_value_order() {
        let mut value = HeaderValue::Single("gzip".to_string());
        value.push("br");
        assert_eq!(value.values().collect::<Vec<_>>(), vec!["gzip", "br"]);
    }
}
