//! Decides, key by key, what survives a re-publish.

use serde_json::{
    Map,
    Value,
};

use crate::document::Document;

/// How a source document is combined with an existing target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Only keys missing from the target are added; target values win.
    #[default]
    Incremental,
    /// The source replaces the target entirely.
    Full,
}

impl MergeMode {
    #[must_use]
    pub const fn from_full(full: bool) -> Self {
        if full { Self::Full } else { Self::Incremental }
    }
}

/// Combines a vendor `source` document with an application `target` document.
///
/// Neither input is modified; the result owns its own copies.
///
/// In incremental mode:
/// - a key missing from the target is copied from the source
/// - a key that is a group on both sides is merged recursively
/// - any other key present in the target keeps the target value
/// - keys only the target has are appended after the source keys
///
/// ```
/// use serde_json::json;
/// use lang_publisher::comparator::{merge, MergeMode};
/// use lang_publisher::document::Document;
///
/// let source = Document::try_from(json!({
///     "auth": { "throttle": ":seconds seconds", "failed": "bad login" }
/// })).unwrap();
/// let target = Document::try_from(json!({
///     "auth": { "throttle": "custom seconds text" }
/// })).unwrap();
///
/// let result = merge(&source, &target, MergeMode::Incremental);
///
/// assert_eq!(result.message("auth.throttle"), Some("custom seconds text"));
/// assert_eq!(result.message("auth.failed"), Some("bad login"));
/// ```
#[must_use]
pub fn merge(source: &Document, target: &Document, mode: MergeMode) -> Document {
    match mode {
        MergeMode::Full => source.clone(),
        // Only existing values are moved around, so the result is valid.
        MergeMode::Incremental => {
            Document::from_valid_map(merge_maps(source.as_map(), target.as_map()))
        }
    }
}

fn merge_maps(source: &Map<String, Value>, target: &Map<String, Value>) -> Map<String, Value> {
    let mut result = Map::with_capacity(source.len().max(target.len()));

    for (key, source_value) in source {
        let merged = match (source_value, target.get(key)) {
            (_, None) => source_value.clone(),
            (Value::Object(source_group), Some(Value::Object(target_group))) => {
                Value::Object(merge_maps(source_group, target_group))
            }
            (_, Some(target_value)) => target_value.clone(),
        };
        result.insert(key.clone(), merged);
    }

    for (key, target_value) in target {
        if !source.contains_key(key) {
            result.insert(key.clone(), target_value.clone());
        }
    }

    result
}
