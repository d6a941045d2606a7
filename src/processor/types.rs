//! Processor result types.

use std::fmt;
use std::path::PathBuf;

/// What happened to a single target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The target did not exist and was written from the source.
    Created,
    /// New source keys were merged into an existing target.
    Merged { added_keys: Vec<String> },
    /// The target was overwritten with the source (full mode).
    Replaced,
    /// The target exists and force was not requested.
    Skipped,
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Merged { added_keys } if added_keys.is_empty() => write!(f, "up to date"),
            Self::Merged { added_keys } => write!(f, "merged {} new key(s)", added_keys.len()),
            Self::Replaced => write!(f, "replaced"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// Outcome of publishing one file, with the paths that were resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub source_path: PathBuf,
    pub target_path: PathBuf,
    pub outcome: FileOutcome,
}
