//! Publishes one translation file from a vendor package into the application.

mod request;
mod types;

use std::fmt;
use std::path::PathBuf;

pub use request::PublishRequest;
pub use types::{
    FileOutcome,
    FileReport,
};

use crate::comparator::{
    MergeMode,
    merge,
};
use crate::document::{
    DocumentStore,
    added_keys,
};
use crate::error::PublishError;
use crate::paths::{
    PathResolver,
    inline_filename,
};

/// Separator used when reporting added keys.
const KEY_SEPARATOR: &str = ".";

/// Runs the load, merge and store steps for a single file.
///
/// Collaborators are passed in rather than looked up, so the same processor
/// works against the filesystem or an in-memory store.
pub struct Processor<'a> {
    resolver: &'a dyn PathResolver,
    store: &'a dyn DocumentStore,
}

impl fmt::Debug for Processor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor").finish_non_exhaustive()
    }
}

impl<'a> Processor<'a> {
    #[must_use]
    pub fn new(resolver: &'a dyn PathResolver, store: &'a dyn DocumentStore) -> Self {
        Self { resolver, store }
    }

    /// Resolves the source file, preferring the `-inline` variant when
    /// requested and present.
    #[must_use]
    pub fn source_path(&self, request: &PublishRequest) -> PathBuf {
        let (package, locale) = (request.package(), request.locale());
        let filename = request.source_filename();

        if request.inline()
            && let Some(inline_name) = inline_filename(filename)
        {
            let inline_path = self.resolver.source_path(package, locale, &inline_name);
            if self.store.exists(&inline_path) {
                tracing::debug!(path = %inline_path.display(), "Using inline variant");
                return inline_path;
            }
        }

        self.resolver.source_path(package, locale, filename)
    }

    #[must_use]
    pub fn target_path(&self, request: &PublishRequest) -> PathBuf {
        self.resolver.target_path(request.locale(), request.target_filename())
    }

    /// Publishes one file.
    ///
    /// An existing target is left alone unless `force` is set. Otherwise
    /// both sides are loaded, merged according to `full`, and the result is
    /// written to the target.
    ///
    /// # Errors
    /// Load, validation and write failures from the store.
    pub fn publish(&self, request: &PublishRequest) -> Result<FileReport, PublishError> {
        let source_path = self.source_path(request);
        let target_path = self.target_path(request);
        let target_exists = self.store.exists(&target_path);

        if target_exists && !request.force() {
            tracing::debug!(target = %target_path.display(), "Target exists, skipping");
            return Ok(FileReport { source_path, target_path, outcome: FileOutcome::Skipped });
        }

        tracing::info!(
            source = %source_path.display(),
            target = %target_path.display(),
            full = request.full(),
            "Processing translation file"
        );

        let source = self.store.load(&source_path)?;
        let target = self.store.load(&target_path)?;

        let mode = MergeMode::from_full(request.full());
        let result = merge(&source, &target, mode);

        self.store.store(&target_path, &result)?;

        let outcome = match mode {
            _ if !target_exists => FileOutcome::Created,
            MergeMode::Full => FileOutcome::Replaced,
            MergeMode::Incremental => {
                FileOutcome::Merged { added_keys: added_keys(&target, &result, KEY_SEPARATOR) }
            }
        };

        Ok(FileReport { source_path, target_path, outcome })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::config::PublisherSettings;
    use crate::document::Document;
    use crate::paths::LayoutResolver;
    use crate::test_utils::{
        MemoryStore,
        document,
    };

    const PACKAGE: &str = "laravel-lang/lang";

    #[fixture]
    fn resolver() -> LayoutResolver {
        LayoutResolver::new(Path::new("/app"), &PublisherSettings::default())
    }

    fn vendor_auth() -> Document {
        document(json!({
            "failed": "These credentials do not match our records.",
            "throttle": "Too many login attempts. Please try again in :seconds seconds."
        }))
    }

    #[rstest]
    fn test_publish_creates_missing_target(resolver: LayoutResolver) {
        let store = MemoryStore::new();
        let request = PublishRequest::new(PACKAGE, "de", "auth.json");
        store.insert(resolver.source_path(PACKAGE, "de", "auth.json"), vendor_auth());

        let report = Processor::new(&resolver, &store).publish(&request).unwrap();

        assert_eq!(report.outcome, FileOutcome::Created);
        assert_eq!(store.get(&resolver.target_path("de", "auth.json")), Some(vendor_auth()));
    }

    #[rstest]
    fn test_publish_skips_existing_target_without_force(resolver: LayoutResolver) {
        let store = MemoryStore::new();
        let target = document(json!({"throttle": "custom"}));
        store.insert(resolver.source_path(PACKAGE, "de", "auth.json"), vendor_auth());
        store.insert(resolver.target_path("de", "auth.json"), target.clone());

        let report = Processor::new(&resolver, &store)
            .publish(&PublishRequest::new(PACKAGE, "de", "auth.json"))
            .unwrap();

        assert_eq!(report.outcome, FileOutcome::Skipped);
        assert_eq!(store.get(&report.target_path), Some(target));
        assert_eq!(store.writes(), 0);
    }

    #[rstest]
    fn test_publish_force_merges_new_keys(resolver: LayoutResolver) {
        let store = MemoryStore::new();
        store.insert(resolver.source_path(PACKAGE, "de", "auth.json"), vendor_auth());
        store.insert(
            resolver.target_path("de", "auth.json"),
            document(json!({"throttle": "custom seconds text"})),
        );
        let request = PublishRequest::new(PACKAGE, "de", "auth.json").with_force(true);

        let report = Processor::new(&resolver, &store).publish(&request).unwrap();

        assert_eq!(report.outcome, FileOutcome::Merged { added_keys: vec!["failed".to_string()] });
        let written = store.get(&report.target_path).unwrap();
        assert_eq!(written.message("throttle"), Some("custom seconds text"));
        assert_eq!(written.message("failed"), vendor_auth().message("failed"));
    }

    #[rstest]
    fn test_publish_force_full_replaces_target(resolver: LayoutResolver) {
        let store = MemoryStore::new();
        store.insert(resolver.source_path(PACKAGE, "de", "auth.json"), vendor_auth());
        store.insert(
            resolver.target_path("de", "auth.json"),
            document(json!({"throttle": "custom", "mine": "kept?"})),
        );
        let request = PublishRequest::new(PACKAGE, "de", "auth.json").with_force(true).with_full(true);

        let report = Processor::new(&resolver, &store).publish(&request).unwrap();

        assert_eq!(report.outcome, FileOutcome::Replaced);
        assert_eq!(store.get(&report.target_path), Some(vendor_auth()));
    }

    #[rstest]
    fn test_full_without_force_still_skips(resolver: LayoutResolver) {
        let store = MemoryStore::new();
        store.insert(resolver.source_path(PACKAGE, "de", "auth.json"), vendor_auth());
        store.insert(resolver.target_path("de", "auth.json"), document(json!({"a": "b"})));
        let request = PublishRequest::new(PACKAGE, "de", "auth.json").with_full(true);

        let report = Processor::new(&resolver, &store).publish(&request).unwrap();

        assert_eq!(report.outcome, FileOutcome::Skipped);
    }

    #[rstest]
    fn test_inline_variant_preferred_when_present(resolver: LayoutResolver) {
        let store = MemoryStore::new();
        let inline = document(json!({"required": "This field is required."}));
        store.insert(resolver.source_path(PACKAGE, "fr", "validation.json"), document(json!({
            "required": "The :attribute field is required."
        })));
        store.insert(resolver.source_path(PACKAGE, "fr", "validation-inline.json"), inline.clone());
        let request = PublishRequest::new(PACKAGE, "fr", "validation.json").with_inline(true);

        let report = Processor::new(&resolver, &store).publish(&request).unwrap();

        assert_eq!(report.source_path, resolver.source_path(PACKAGE, "fr", "validation-inline.json"));
        assert_eq!(report.target_path, resolver.target_path("fr", "validation.json"));
        assert_eq!(store.get(&report.target_path), Some(inline));
    }

    #[rstest]
    fn test_inline_falls_back_to_plain_file(resolver: LayoutResolver) {
        let store = MemoryStore::new();
        store.insert(resolver.source_path(PACKAGE, "fr", "auth.json"), vendor_auth());
        let request = PublishRequest::new(PACKAGE, "fr", "auth.json").with_inline(true);

        let processor = Processor::new(&resolver, &store);

        assert_eq!(processor.source_path(&request), resolver.source_path(PACKAGE, "fr", "auth.json"));
    }

    #[rstest]
    fn test_inline_ignored_when_not_requested(resolver: LayoutResolver) {
        let store = MemoryStore::new();
        store.insert(resolver.source_path(PACKAGE, "fr", "auth-inline.json"), vendor_auth());
        let request = PublishRequest::new(PACKAGE, "fr", "auth.json");

        let processor = Processor::new(&resolver, &store);

        assert_eq!(processor.source_path(&request), resolver.source_path(PACKAGE, "fr", "auth.json"));
    }

    #[rstest]
    fn test_custom_target_filename(resolver: LayoutResolver) {
        let store = MemoryStore::new();
        store.insert(resolver.source_path(PACKAGE, "ru", "auth.json"), vendor_auth());
        let request =
            PublishRequest::new(PACKAGE, "ru", "auth.json").with_target_filename("login.json");

        let report = Processor::new(&resolver, &store).publish(&request).unwrap();

        assert_eq!(report.target_path, resolver.target_path("ru", "login.json"));
        assert!(store.get(&resolver.target_path("ru", "auth.json")).is_none());
    }

    #[rstest]
    fn test_missing_source_keeps_target(resolver: LayoutResolver) {
        let store = MemoryStore::new();
        let target = document(json!({"mine": "value"}));
        store.insert(resolver.target_path("ru", "auth.json"), target.clone());
        let request = PublishRequest::new(PACKAGE, "ru", "auth.json").with_force(true);

        let report = Processor::new(&resolver, &store).publish(&request).unwrap();

        assert_eq!(report.outcome, FileOutcome::Merged { added_keys: vec![] });
        assert_eq!(store.get(&report.target_path), Some(target));
    }
}
