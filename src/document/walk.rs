//! Directory walking for [`super::JsonFileStore`].

use std::path::Path;

use ignore::WalkBuilder;

use crate::error::PublishError;

/// Names of the immediate subdirectories of `root`, sorted.
///
/// A missing root yields an empty list.
pub(super) fn list_dirs(root: &Path) -> Vec<String> {
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "Directory not found");
        return Vec::new();
    }

    let mut names: Vec<String> = walker(root, 1)
        .filter_map(|result| match result {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                None
            }
        })
        .filter(|entry| entry.depth() == 1 && entry.file_type().is_some_and(|ft| ft.is_dir()))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    names.sort();
    names
}

/// Every file under `dir`, as `/`-separated paths relative to `dir`, sorted.
pub(super) fn list_files(dir: &Path) -> Result<Vec<String>, PublishError> {
    if !dir.is_dir() {
        return Err(PublishError::Scan {
            path: dir.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut found = Vec::new();

    for result in walker(dir, usize::MAX) {
        let entry = result
            .map_err(|err| PublishError::Scan { path: dir.to_path_buf(), message: err.to_string() })?;

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let Ok(relative_path) = entry.path().strip_prefix(dir) else {
            continue;
        };
        found.push(relative_path.to_string_lossy().replace('\\', "/"));
    }

    found.sort();
    Ok(found)
}

fn walker(root: &Path, max_depth: usize) -> ignore::Walk {
    WalkBuilder::new(root)
        // Vendor directories are not subject to ignore files.
        .standard_filters(false)
        .follow_links(false)
        .max_depth(Some(max_depth))
        .build()
}
