//! Error types for hashing runs.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that prevent a run from starting.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for the root path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Root path not found.
    #[error("Directory {path} does not exist")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Errors confined to a single file. These never abort a run; the worker
/// turns them into an error outcome.
#[derive(Debug, Error)]
pub enum FileError {
    /// A directory entry could not be read during traversal.
    #[error("Error accessing path {path}: {message}")]
    Traversal { path: PathBuf, message: String },

    /// The source file could not be opened.
    #[error("Cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source file size could not be determined.
    #[error("Cannot stat {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading failed part way through the file.
    #[error("Read error in {path} after {offset} bytes: {source}")]
    Read {
        path: PathBuf,
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    /// The sidecar could not be written.
    #[error("Cannot write sidecar {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sidecar record could not be serialized.
    #[error("Cannot serialize sidecar {path}: {message}")]
    Serialize { path: PathBuf, message: String },
}

impl FileError {
    /// Path the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Traversal { path, .. }
            | Self::Open { path, .. }
            | Self::Metadata { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Serialize { path, .. } => path,
        }
    }

    /// Whether the error happened after hashing completed.
    pub fn is_write_error(&self) -> bool {
        matches!(self, Self::Write { .. } | Self::Serialize { .. })
    }
}
