//! HTTP Request body types

use serde_json::{Map, Value};

/// Content type sent with JSON field bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type sent with form-encoded bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Body attached to an outgoing request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// Text sent verbatim, without an implied content type.
    Raw(String),
    /// Named fields serialized as a JSON object.
    Json(Map<String, Value>),
    /// Name/value pairs sent URL-encoded.
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Builds a JSON body from string fields, keeping the last value of a
    /// repeated name.
    #[must_use]
    pub fn json_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = fields
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        Self::Json(map)
    }

    /// Returns the content type implied by the body kind, if any.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None | Self::Raw(_) => None,
            Self::Json(_) => Some(JSON_CONTENT_TYPE),
            Self::Form(_) => Some(FORM_CONTENT_TYPE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_fields_body() {
        let body = RequestBody::json_fields([("name", "Ada"), ("lang", "en")]);
        assert_eq!(body.content_type(), Some(JSON_CONTENT_TYPE));

        let RequestBody::Json(map) = body else {
            unreachable!("json_fields always builds a JSON body");
        };
        assert_eq!(map.get("name"), Some(&Value::String("Ada".to_string())));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_raw_body_has_no_implied_content_type() {
        let body = RequestBody::Raw("plain".to_string());
        assert_eq!(body.content_type(), None);
        assert_eq!(RequestBody::None.content_type(), None);
        assert_eq!(
            RequestBody::Form(Vec::new()).content_type(),
            Some(FORM_CONTENT_TYPE)
        );
    }
}
