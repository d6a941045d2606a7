use std::path::PathBuf;

use thiserror::Error;

use crate::document::{
    DocumentError,
    LoadError,
};

/// Errors that may occur while publishing translation files
#[derive(Error, Debug)]
pub enum PublishError {
    /// The requested locale has no directory in the vendor package
    #[error("The source directory for \"{0}\" localization was not found.")]
    SourceLocaleNotExists(String),
    /// Reading or parsing a translation file failed
    #[error("Failed to load translation file {}: {source}", .path.display())]
    DocumentLoad {
        path: PathBuf,
        #[source]
        source: LoadError,
    },
    /// Writing a translation file failed
    #[error("Failed to write translation file {}: {source}", .path.display())]
    DocumentWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file parsed as JSON but is not a tree of messages
    #[error("{}: {source}", .path.display())]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
    /// Default and fallback locales cannot be uninstalled
    #[error("The \"{0}\" locale is protected and cannot be removed.")]
    ProtectedLocale(String),
    /// Walking a locale directory failed
    #[error("Failed to scan {}: {message}", .path.display())]
    Scan { path: PathBuf, message: String },
}
