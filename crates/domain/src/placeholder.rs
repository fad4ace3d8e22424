//! Literal placeholder substitution.
//!
//! Placeholders are plain tokens replaced verbatim in URLs and bodies right
//! before use. There is no escaping and no template syntax: a token is any
//! string, and every occurrence of it is replaced.

/// Ordered token to replacement mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    entries: Vec<(String, String)>,
}

impl Placeholders {
    /// Creates an empty set of placeholders.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers a token, overwriting its value if already registered.
    ///
    /// An overwritten token keeps its original position in the replacement order.
    pub fn set(&mut self, token: impl Into<String>, value: impl Into<String>) {
        let token = token.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == token) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((token, value)),
        }
    }

    /// Replaces every registered token in `input`, in registration order.
    ///
    /// Each token is applied once, to the output of the previous one, so a
    /// replacement may itself contain a later token.
    #[must_use]
    pub fn replace(&self, input: &str) -> String {
        self.entries
            .iter()
            .filter(|(token, _)| !token.is_empty())
            .fold(input.to_string(), |acc, (token, value)| acc.replace(token.as_str(), value))
    }
}
