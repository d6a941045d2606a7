//! Translation document: a string-keyed tree whose leaves are messages.

pub mod store;
mod walk;

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

pub use store::{
    DocumentStore,
    JsonFileStore,
    LoadError,
};

/// Errors raised while building a [`Document`] from arbitrary JSON.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// A value that is neither a message nor a nested group.
    #[error("Invalid translation document at '{key_path}': expected string or object, found {found}")]
    InvalidDocument {
        /// Dot-joined path to the offending value (empty for the root).
        key_path: String,
        found: &'static str,
    },
}

/// In-memory form of a translation file.
///
/// Key order follows the file the document was read from, so that written
/// output produces stable diffs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps a map after checking that every value is a string or an object.
    ///
    /// # Errors
    /// Returns [`DocumentError::InvalidDocument`] on the first value of any
    /// other kind.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, DocumentError> {
        validate_map(&map, None)?;
        Ok(Self(map))
    }

    /// Wraps a map built from values taken out of other documents.
    pub(crate) const fn from_valid_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Looks up a message by dotted key, e.g. `auth.throttle`.
    ///
    /// A top-level key spelled exactly like `dotted_key` wins over the nested
    /// path, since flat JSON files use whole sentences as keys. Returns `None`
    /// when the path is missing or ends on a group.
    #[must_use]
    pub fn message(&self, dotted_key: &str) -> Option<&str> {
        if let Some(Value::String(message)) = self.0.get(dotted_key) {
            return Some(message.as_str());
        }

        let mut parts = dotted_key.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        current.as_str()
    }

    /// Flattened leaf keys in document order.
    ///
    /// ```
    /// use serde_json::json;
    /// use lang_publisher::document::Document;
    ///
    /// let doc = Document::try_from(json!({
    ///     "auth": { "failed": "bad login", "throttle": "wait" },
    ///     "title": "Title"
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(doc.leaf_keys("."), vec!["auth.failed", "auth.throttle", "title"]);
    /// ```
    #[must_use]
    pub fn leaf_keys(&self, separator: &str) -> Vec<String> {
        let mut result = Vec::new();
        collect_leaf_keys(&self.0, separator, None, &mut result);
        result
    }
}

impl TryFrom<Value> for Document {
    type Error = DocumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Self::from_map(map),
            other => Err(DocumentError::InvalidDocument {
                key_path: String::new(),
                found: kind_name(&other),
            }),
        }
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        Self::Object(document.0)
    }
}

/// Leaf keys of `after` that `before` does not have, in `after` order.
///
/// Leaves are compared by their key path, so a flat key containing
/// `separator` is never mistaken for a nested key of the same spelling.
/// Only the returned names are joined with `separator`.
#[must_use]
pub fn added_keys(before: &Document, after: &Document, separator: &str) -> Vec<String> {
    let existing: HashSet<Vec<&str>> = leaf_paths(&before.0).into_iter().collect();
    leaf_paths(&after.0)
        .into_iter()
        .filter(|path| !existing.contains(path))
        .map(|path| path.join(separator))
        .collect()
}

fn leaf_paths(map: &Map<String, Value>) -> Vec<Vec<&str>> {
    let mut result = Vec::new();
    collect_leaf_paths(map, &mut Vec::new(), &mut result);
    result
}

fn collect_leaf_paths<'a>(
    map: &'a Map<String, Value>,
    prefix: &mut Vec<&'a str>,
    result: &mut Vec<Vec<&'a str>>,
) {
    for (key, value) in map {
        prefix.push(key);
        match value {
            Value::Object(nested) => collect_leaf_paths(nested, prefix, result),
            _ => result.push(prefix.clone()),
        }
        prefix.pop();
    }
}

fn validate_map(map: &Map<String, Value>, prefix: Option<&str>) -> Result<(), DocumentError> {
    for (key, value) in map {
        let key_path = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
        match value {
            Value::String(_) => {}
            Value::Object(nested) => validate_map(nested, Some(&key_path))?,
            other => {
                return Err(DocumentError::InvalidDocument { key_path, found: kind_name(other) });
            }
        }
    }
    Ok(())
}

fn collect_leaf_keys(
    map: &Map<String, Value>,
    separator: &str,
    prefix: Option<&str>,
    result: &mut Vec<String>,
) {
    for (key, value) in map {
        let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
        match value {
            Value::Object(nested) => collect_leaf_keys(nested, separator, Some(&full_key), result),
            _ => result.push(full_key),
        }
    }
}

const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[googletest::test]
    fn test_try_from_nested_object() {
        let doc = Document::try_from(json!({
            "auth": {
                "failed": "These credentials do not match our records.",
                "throttle": "Too many login attempts. Please try again in :seconds seconds."
            },
            "title": "Title"
        }))
        .unwrap();

        expect_that!(doc.len(), eq(2));
        expect_that!(doc.message("auth.failed"), some(contains_substring("credentials")));
        expect_that!(doc.message("title"), some(eq("Title")));
        expect_that!(doc.message("auth"), none());
        expect_that!(doc.message("auth.missing"), none());
    }

    #[rstest]
    #[case(json!({"a": ["x", "y"]}), "a", "array")]
    #[case(json!({"a": {"b": 1}}), "a.b", "number")]
    #[case(json!({"a": {"b": {"c": true}}}), "a.b.c", "boolean")]
    #[case(json!({"ok": "x", "a": null}), "a", "null")]
    #[case(json!("just a string"), "", "string")]
    fn test_try_from_rejects_non_string_leaves(
        #[case] value: Value,
        #[case] expected_path: &str,
        #[case] expected_kind: &'static str,
    ) {
        let result = Document::try_from(value);

        assert_eq!(
            result,
            Err(DocumentError::InvalidDocument {
                key_path: expected_path.to_string(),
                found: expected_kind,
            })
        );
    }

    #[googletest::test]
    fn test_keys_keep_insertion_order() {
        let doc = Document::try_from(json!({"zeta": "z", "alpha": "a", "mid": "m"})).unwrap();

        let keys: Vec<String> = doc.keys().cloned().collect();

        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[googletest::test]
    fn test_leaf_keys_custom_separator() {
        let doc = Document::try_from(json!({"a": {"b": {"c": "deep"}}, "d": "flat"})).unwrap();

        expect_that!(doc.leaf_keys("_"), elements_are![eq("a_b_c"), eq("d")]);
    }

    #[googletest::test]
    fn test_added_keys_reports_only_new_leaves() {
        let before = Document::try_from(json!({"auth": {"throttle": "custom"}})).unwrap();
        let after = Document::try_from(json!({
            "auth": {"throttle": "custom", "failed": "bad login"},
            "extra": "x"
        }))
        .unwrap();

        expect_that!(added_keys(&before, &after, "."), elements_are![eq("auth.failed"), eq("extra")]);
        expect_that!(added_keys(&after, &after, "."), len(eq(0)));
    }

    #[googletest::test]
    fn test_added_keys_separates_flat_and_nested_keys() {
        let before = Document::try_from(json!({"auth.failed": "flat"})).unwrap();
        let after = Document::try_from(json!({
            "auth.failed": "flat",
            "auth": {"failed": "nested"}
        }))
        .unwrap();

        expect_that!(added_keys(&before, &after, "."), elements_are![eq("auth.failed")]);
    }

    #[googletest::test]
    fn test_message_prefers_flat_sentence_key() {
        let doc = Document::try_from(json!({
            "Whoops! Something went wrong.": "Hoppla! Etwas ist schiefgelaufen.",
            "auth": {"failed": "nested"}
        }))
        .unwrap();

        expect_that!(
            doc.message("Whoops! Something went wrong."),
            some(eq("Hoppla! Etwas ist schiefgelaufen."))
        );
        expect_that!(doc.message("auth.failed"), some(eq("nested")));
    }

    #[googletest::test]
    fn test_serialize_is_transparent() {
        let doc = Document::try_from(json!({"b": "2", "a": {"c": "3"}})).unwrap();

        let text = serde_json::to_string(&doc).unwrap();

        expect_that!(text, eq(r#"{"b":"2","a":{"c":"3"}}"#));
    }
}
