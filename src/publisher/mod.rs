//! Bulk operations over locales: install, update, reset and uninstall.

mod report;
mod scan;

use std::cmp::Reverse;
use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

pub use report::{
    LocaleReport,
    PublishReport,
    Report,
    UninstallReport,
};

use crate::config::PublisherSettings;
use crate::document::DocumentStore;
use crate::error::PublishError;
use crate::paths::PathResolver;
use crate::processor::{
    FileReport,
    Processor,
    PublishRequest,
};
use scan::FileFilter;

/// Locale argument that stands for every available locale.
pub const ALL_LOCALES: &str = "*";

/// Flags applied to every file of a bulk publish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishOptions {
    /// Re-process files whose target already exists.
    pub force: bool,
    /// Replace targets instead of merging new keys into them.
    pub full: bool,
}

impl PublishOptions {
    /// First-time publish: existing files are left alone unless forced.
    #[must_use]
    pub const fn install(force: bool) -> Self {
        Self { force, full: false }
    }

    /// Adds keys the vendor introduced, keeping local edits.
    #[must_use]
    pub const fn update() -> Self {
        Self { force: true, full: false }
    }

    /// Re-publishes from the vendor; with `full`, local edits are discarded.
    #[must_use]
    pub const fn reset(full: bool) -> Self {
        Self { force: true, full }
    }
}

/// Publishes the files of one vendor package for many locales.
pub struct Publisher<'a> {
    settings: &'a PublisherSettings,
    resolver: &'a dyn PathResolver,
    store: &'a dyn DocumentStore,
}

impl fmt::Debug for Publisher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher").field("package", &self.settings.package).finish_non_exhaustive()
    }
}

impl<'a> Publisher<'a> {
    #[must_use]
    pub fn new(
        settings: &'a PublisherSettings,
        resolver: &'a dyn PathResolver,
        store: &'a dyn DocumentStore,
    ) -> Self {
        Self { settings, resolver, store }
    }

    /// Locales the vendor package ships.
    #[must_use]
    pub fn available_locales(&self) -> Vec<String> {
        self.store.list_dirs(&self.resolver.source_root(&self.settings.package))
    }

    /// Locales present in the application language directory.
    #[must_use]
    pub fn installed_locales(&self) -> Vec<String> {
        self.store.list_dirs(&self.resolver.target_root())
    }

    /// Expands [`ALL_LOCALES`] and drops duplicates, keeping first occurrence.
    #[must_use]
    pub fn resolve_locales<S: AsRef<str>>(&self, requested: &[S]) -> Vec<String> {
        let mut locales: Vec<String> = Vec::new();
        for locale in requested.iter().map(AsRef::as_ref) {
            let expanded = if locale == ALL_LOCALES {
                self.available_locales()
            } else {
                vec![locale.to_string()]
            };
            for locale in expanded {
                if !locales.contains(&locale) {
                    locales.push(locale);
                }
            }
        }
        locales
    }

    /// Publishes every requested locale.
    ///
    /// Each locale runs to completion before the next one starts; a failing
    /// locale is recorded in the report and the rest still run.
    pub fn publish<S: AsRef<str>>(&self, locales: &[S], options: PublishOptions) -> PublishReport {
        let mut report = PublishReport::default();

        for locale in self.resolve_locales(locales) {
            let result = self.publish_locale(&locale, options);
            if let Err(err) = &result {
                tracing::warn!(locale = %locale, "{err}");
            }
            report.push(locale, result);
        }

        report
    }

    /// Publishes every file of one locale, stopping at the first error.
    ///
    /// # Errors
    /// - `SourceLocaleNotExists` when the vendor has no such locale
    /// - any load, validation or write error of a file
    pub fn publish_locale(
        &self,
        locale: &str,
        options: PublishOptions,
    ) -> Result<Vec<FileReport>, PublishError> {
        let package = &self.settings.package;
        let source_dir = self.resolver.source_dir(package, locale);

        if !self.store.dir_exists(&source_dir) {
            return Err(PublishError::SourceLocaleNotExists(locale.to_string()));
        }

        tracing::info!(locale = %locale, force = options.force, full = options.full, "Publishing locale");

        let processor = Processor::new(self.resolver, self.store);

        self.files(&source_dir, true)?
            .into_iter()
            .map(|filename| {
                let request = PublishRequest::new(package.as_str(), locale, filename)
                    .with_force(options.force)
                    .with_full(options.full)
                    .with_inline(self.settings.inline);
                processor.publish(&request)
            })
            .collect()
    }

    /// Adds new vendor keys to every installed locale.
    pub fn update(&self) -> PublishReport {
        self.publish(&self.installed_locales(), PublishOptions::update())
    }

    /// Re-publishes the given locales, or every installed one when empty.
    pub fn reset<S: AsRef<str>>(&self, locales: &[S], full: bool) -> PublishReport {
        if locales.is_empty() {
            self.publish(&self.installed_locales(), PublishOptions::reset(full))
        } else {
            self.publish(locales, PublishOptions::reset(full))
        }
    }

    /// Removes the published files of each locale, then every directory of
    /// the locale left empty, the locale directory included.
    ///
    /// The default and fallback locales are refused with `ProtectedLocale`.
    pub fn uninstall<S: AsRef<str>>(&self, locales: &[S]) -> UninstallReport {
        let mut report = UninstallReport::default();

        for locale in locales.iter().map(AsRef::as_ref) {
            let result = self.uninstall_locale(locale);
            if let Err(err) = &result {
                tracing::warn!(locale = %locale, "{err}");
            }
            report.push(locale, result);
        }

        report
    }

    fn uninstall_locale(&self, locale: &str) -> Result<Vec<PathBuf>, PublishError> {
        if self.settings.protected_locales().contains(&locale) {
            return Err(PublishError::ProtectedLocale(locale.to_string()));
        }

        let target_dir = self.resolver.target_dir(locale);
        if !self.store.dir_exists(&target_dir) {
            tracing::debug!(locale = %locale, "Locale is not installed");
            return Ok(Vec::new());
        }

        tracing::info!(locale = %locale, "Uninstalling locale");

        let mut removed = Vec::new();
        let mut dirs = vec![target_dir.clone()];
        for filename in self.files(&target_dir, false)? {
            let path = self.resolver.target_path(locale, &filename);
            self.store.remove(&path)?;

            for dir in path.ancestors().skip(1).take_while(|dir| dir.starts_with(&target_dir)) {
                if !dirs.iter().any(|known| known == dir) {
                    dirs.push(dir.to_path_buf());
                }
            }
            removed.push(path);
        }

        // Deepest first, so a parent is only checked once its children are gone.
        dirs.sort_by_key(|dir| Reverse(dir.components().count()));
        for dir in &dirs {
            self.store.remove_dir_if_empty(dir)?;
        }

        Ok(removed)
    }

    fn files(&self, dir: &Path, skip_inline: bool) -> Result<Vec<String>, PublishError> {
        let filter = FileFilter::from_settings(self.settings)
            .map_err(|message| PublishError::Scan { path: dir.to_path_buf(), message })?;
        Ok(scan::select_files(self.store.list_files(dir)?, &filter, skip_inline))
    }
}
