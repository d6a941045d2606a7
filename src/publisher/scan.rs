//! Selection of the translation files a locale publishes.

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use crate::config::PublisherSettings;
use crate::paths::is_inline_variant;

/// Include/exclude patterns applied to paths relative to a locale directory.
#[derive(Debug, Clone)]
pub(crate) struct FileFilter {
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl FileFilter {
    pub(crate) fn from_settings(settings: &PublisherSettings) -> Result<Self, String> {
        let include_set = build_glob_set(std::slice::from_ref(&settings.file_pattern))?;
        let exclude_set = build_glob_set(&settings.exclude_patterns)?;
        Ok(Self { include_set, exclude_set })
    }

    fn is_match(&self, relative_path: &str) -> bool {
        self.include_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, String> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).map_err(|e| format!("Invalid pattern '{pattern}': {e}"))?;
        builder.add(glob);
    }
    builder.build().map_err(|e| format!("Failed to build patterns: {e}"))
}

/// Keeps the files `filter` accepts, optionally leaving out `-inline`
/// variants: those stand in for their plain counterpart rather than being
/// published on their own.
pub(crate) fn select_files(files: Vec<String>, filter: &FileFilter, skip_inline: bool) -> Vec<String> {
    files
        .into_iter()
        .filter(|file| filter.is_match(file))
        .filter(|file| !(skip_inline && is_inline_variant(file)))
        .collect()
}
