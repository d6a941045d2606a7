//! Reading and writing translation documents.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use super::{
    Document,
    walk,
};
use crate::error::PublishError;

/// Why a translation file could not be loaded.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Persistence boundary for translation documents and the directories that
/// hold them.
///
/// The publisher only talks to the filesystem through this trait, so tests
/// can substitute an in-memory implementation.
pub trait DocumentStore {
    /// Loads the document at `path`, or an empty document if nothing is there.
    ///
    /// # Errors
    /// - `DocumentLoad` when the file cannot be read or is not JSON
    /// - `InvalidDocument` when the JSON is not a tree of strings
    fn load(&self, path: &Path) -> Result<Document, PublishError>;

    /// Writes `document` to `path`, creating parent directories.
    ///
    /// # Errors
    /// `DocumentWrite` on I/O failure.
    fn store(&self, path: &Path, document: &Document) -> Result<(), PublishError>;

    fn exists(&self, path: &Path) -> bool;

    /// Removes the document at `path`. Missing files are not an error.
    ///
    /// # Errors
    /// `DocumentWrite` on I/O failure.
    fn remove(&self, path: &Path) -> Result<(), PublishError>;

    fn dir_exists(&self, dir: &Path) -> bool;

    /// Names of the immediate subdirectories of `dir`, sorted; empty when
    /// `dir` does not exist.
    fn list_dirs(&self, dir: &Path) -> Vec<String>;

    /// Every file below `dir` as a sorted, `/`-separated relative path.
    ///
    /// # Errors
    /// `Scan` when `dir` is missing or part of it cannot be read.
    fn list_files(&self, dir: &Path) -> Result<Vec<String>, PublishError>;

    /// Removes `dir` when nothing is left in it. Returns whether it was removed.
    ///
    /// # Errors
    /// `DocumentWrite` on I/O failure.
    fn remove_dir_if_empty(&self, dir: &Path) -> Result<bool, PublishError>;
}

/// Stores documents as pretty-printed JSON files.
#[derive(Debug, Clone, Copy)]
pub struct JsonFileStore {
    /// Spaces per indentation level
    indent: usize,
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

impl JsonFileStore {
    #[must_use]
    pub const fn new(indent: usize) -> Self {
        Self { indent }
    }

    /// Renders a document the way [`DocumentStore::store`] writes it.
    ///
    /// # Errors
    /// Serialization of a string tree does not fail in practice; the error is
    /// propagated rather than assumed away.
    pub fn render(&self, document: &Document) -> Result<String, serde_json::Error> {
        let indent = " ".repeat(self.indent);
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        document.serialize(&mut serializer)?;
        buffer.push(b'\n');
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self, path: &Path) -> Result<Document, PublishError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Translation file not found, using empty document");
            return Ok(Document::new());
        }

        tracing::debug!(path = %path.display(), "Loading translation file");

        let content = std::fs::read_to_string(path).map_err(|e| PublishError::DocumentLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        if content.trim().is_empty() {
            return Ok(Document::new());
        }

        let json: Value = serde_json::from_str(&content).map_err(|e| {
            PublishError::DocumentLoad { path: path.to_path_buf(), source: e.into() }
        })?;

        Document::try_from(json)
            .map_err(|source| PublishError::InvalidDocument { path: path.to_path_buf(), source })
    }

    fn store(&self, path: &Path, document: &Document) -> Result<(), PublishError> {
        tracing::debug!(path = %path.display(), keys = document.len(), "Saving translation file");

        let write_error =
            |source: std::io::Error| PublishError::DocumentWrite { path: path.to_path_buf(), source };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }

        let text = self.render(document).map_err(|e| write_error(e.into()))?;
        std::fs::write(path, text).map_err(write_error)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn remove(&self, path: &Path) -> Result<(), PublishError> {
        if !path.exists() {
            return Ok(());
        }

        tracing::debug!(path = %path.display(), "Removing translation file");
        std::fs::remove_file(path)
            .map_err(|source| PublishError::DocumentWrite { path: path.to_path_buf(), source })
    }

    fn dir_exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn list_dirs(&self, dir: &Path) -> Vec<String> {
        walk::list_dirs(dir)
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<String>, PublishError> {
        walk::list_files(dir)
    }

    fn remove_dir_if_empty(&self, dir: &Path) -> Result<bool, PublishError> {
        let write_error =
            |source: std::io::Error| PublishError::DocumentWrite { path: dir.to_path_buf(), source };

        let mut entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(write_error(err)),
        };
        if entries.next().is_some() {
            return Ok(false);
        }

        tracing::debug!(dir = %dir.display(), "Removing empty directory");
        std::fs::remove_dir(dir).map_err(write_error)?;
        Ok(true)
    }
}
