//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::cell::{
    Cell,
    RefCell,
};
use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;

use crate::document::{
    Document,
    DocumentStore,
};
use crate::error::PublishError;

/// JSON から Document を作成する
pub(crate) fn document(value: Value) -> Document {
    Document::try_from(value).unwrap()
}

/// ファイルシステムを使わない `DocumentStore`
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    /// パスごとのドキュメント
    documents: RefCell<HashMap<PathBuf, Document>>,
    /// `store` が呼ばれた回数
    writes: Cell<usize>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// 書き込み回数に数えずにドキュメントを配置する
    pub(crate) fn insert(&self, path: PathBuf, document: Document) {
        self.documents.borrow_mut().insert(path, document);
    }

    pub(crate) fn get(&self, path: &Path) -> Option<Document> {
        self.documents.borrow().get(path).cloned()
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, path: &Path) -> Result<Document, PublishError> {
        Ok(self.get(path).unwrap_or_default())
    }

    fn store(&self, path: &Path, document: &Document) -> Result<(), PublishError> {
        self.writes.set(self.writes.get() + 1);
        self.insert(path.to_path_buf(), document.clone());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.documents.borrow().contains_key(path)
    }

    fn remove(&self, path: &Path) -> Result<(), PublishError> {
        self.documents.borrow_mut().remove(path);
        Ok(())
    }

    /// ディレクトリはドキュメントが配下にある間だけ存在する
    fn dir_exists(&self, dir: &Path) -> bool {
        self.documents.borrow().keys().any(|path| path != dir && path.starts_with(dir))
    }

    fn list_dirs(&self, dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = self
            .documents
            .borrow()
            .keys()
            .filter_map(|path| path.strip_prefix(dir).ok())
            .filter(|relative| relative.components().count() > 1)
            .filter_map(|relative| relative.components().next())
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<String>, PublishError> {
        if !self.dir_exists(dir) {
            return Err(PublishError::Scan {
                path: dir.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }

        let mut files: Vec<String> = self
            .documents
            .borrow()
            .keys()
            .filter_map(|path| path.strip_prefix(dir).ok())
            .map(|relative| relative.to_string_lossy().replace('\\', "/"))
            .collect();
        files.sort();
        Ok(files)
    }

    fn remove_dir_if_empty(&self, dir: &Path) -> Result<bool, PublishError> {
        Ok(!self.dir_exists(dir))
    }
}
