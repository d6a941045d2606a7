//! Maps (package, locale, filename) to source and target locations.

use std::path::{
    Path,
    PathBuf,
};

use crate::config::PublisherSettings;

/// Deterministic path layout for vendor sources and application targets.
pub trait PathResolver {
    /// Directory holding the vendor files for one locale.
    fn source_dir(&self, package: &str, locale: &str) -> PathBuf;

    /// Directory holding the application files for one locale.
    fn target_dir(&self, locale: &str) -> PathBuf;

    /// Directory whose subdirectories are the locales a package ships.
    fn source_root(&self, package: &str) -> PathBuf;

    /// Directory whose subdirectories are the installed locales.
    fn target_root(&self) -> PathBuf;

    fn source_path(&self, package: &str, locale: &str, filename: &str) -> PathBuf {
        self.source_dir(package, locale).join(filename)
    }

    fn target_path(&self, locale: &str, filename: &str) -> PathBuf {
        self.target_dir(locale).join(filename)
    }
}

/// Layout derived from [`PublisherSettings`]:
///
/// - source: `<workspace>/<vendorPath>/<package>/<localesDir>/<locale>/<file>`
/// - target: `<workspace>/<langPath>/<locale>/<file>`
#[derive(Debug, Clone)]
pub struct LayoutResolver {
    workspace_root: PathBuf,
    vendor_path: PathBuf,
    locales_dir: String,
    lang_path: PathBuf,
}

impl LayoutResolver {
    #[must_use]
    pub fn new(workspace_root: &Path, settings: &PublisherSettings) -> Self {
        Self {
            workspace_root: workspace_root.to_path_buf(),
            vendor_path: PathBuf::from(&settings.vendor_path),
            locales_dir: settings.locales_dir.clone(),
            lang_path: PathBuf::from(&settings.lang_path),
        }
    }
}

impl PathResolver for LayoutResolver {
    fn source_dir(&self, package: &str, locale: &str) -> PathBuf {
        self.source_root(package).join(locale)
    }

    fn target_dir(&self, locale: &str) -> PathBuf {
        self.target_root().join(locale)
    }

    fn source_root(&self, package: &str) -> PathBuf {
        let root = self.workspace_root.join(&self.vendor_path).join(package);
        if self.locales_dir.is_empty() { root } else { root.join(&self.locales_dir) }
    }

    fn target_root(&self) -> PathBuf {
        self.workspace_root.join(&self.lang_path)
    }
}

/// The `-inline` variant of a filename: `dir/name.ext` becomes
/// `dir/name-inline.ext`.
///
/// Returns `None` for names without a file stem.
#[must_use]
pub fn inline_filename(filename: &str) -> Option<String> {
    let path = Path::new(filename);
    let stem = path.file_stem()?.to_string_lossy();
    let name = path.extension().map_or_else(
        || format!("{stem}-inline"),
        |ext| format!("{stem}-inline.{}", ext.to_string_lossy()),
    );

    Some(match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => format!("{}/{name}", parent.to_string_lossy()),
        None => name,
    })
}

/// Whether a filename is itself an `-inline` variant.
#[must_use]
pub fn is_inline_variant(filename: &str) -> bool {
    Path::new(filename)
        .file_stem()
        .is_some_and(|stem| stem.to_string_lossy().ends_with("-inline"))
}
