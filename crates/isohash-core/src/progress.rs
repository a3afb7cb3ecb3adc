//! Hashing progress reporting.

use std::path::PathBuf;

/// Progress of a single file's digest pass.
#[derive(Debug, Clone)]
pub struct HashProgress {
    /// Worker that is hashing the file.
    pub worker: usize,
    /// File being hashed.
    pub path: PathBuf,
    /// Bytes absorbed so far.
    pub bytes_processed: u64,
    /// Size of the file when it was opened.
    pub bytes_total: u64,
}

impl HashProgress {
    /// Create a progress observation.
    pub fn new(
        worker: usize,
        path: impl Into<PathBuf>,
        bytes_processed: u64,
        bytes_total: u64,
    ) -> Self {
        Self {
            worker,
            path: path.into(),
            bytes_processed,
            bytes_total,
        }
    }

    /// Get the progress as a percentage (0.0 to 100.0).
    ///
    /// An empty file is complete as soon as it is opened.
    pub fn percentage(&self) -> f64 {
        if self.bytes_total > 0 {
            (self.bytes_processed as f64 / self.bytes_total as f64) * 100.0
        } else {
            100.0
        }
    }

    /// Check whether every byte has been absorbed.
    pub fn is_complete(&self) -> bool {
        self.bytes_processed >= self.bytes_total
    }

    /// File name for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }
}
