//! Per-file outcomes.

use std::path::{Path, PathBuf};

use crate::digest::DigestReport;
use crate::error::FileError;

/// What happened to one queued path. Exactly one outcome is emitted per
/// path that enters the work queue, plus one per traversal error.
#[derive(Debug)]
pub enum WorkOutcome {
    /// The file was hashed and its sidecar written.
    Processed {
        path: PathBuf,
        sidecar: PathBuf,
        size: u64,
        report: DigestReport,
    },
    /// A sidecar already existed; the file was not opened.
    Skipped { path: PathBuf, sidecar: PathBuf },
    /// Hashing, writing or traversal failed for this path.
    Error { path: PathBuf, error: FileError },
}

impl WorkOutcome {
    /// Build an error outcome, taking the path from the error.
    pub fn from_error(error: FileError) -> Self {
        Self::Error {
            path: error.path().to_path_buf(),
            error,
        }
    }

    /// Source path this outcome refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Processed { path, .. }
            | Self::Skipped { path, .. }
            | Self::Error { path, .. } => path,
        }
    }

    /// Check if this is a processed outcome.
    pub fn is_processed(&self) -> bool {
        matches!(self, Self::Processed { .. })
    }

    /// Check if this is a skipped outcome.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// Check if this is an error outcome.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
