//! Hashing run configuration.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::error::ScanError;

/// Configuration for a hashing run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct HashConfig {
    /// Root directory to scan.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Case-insensitive file name suffix selecting inputs.
    #[builder(default = "default_suffix()")]
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Number of hashing workers.
    #[builder(default = "4")]
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Skip files that already have a sidecar.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub skip_existing: bool,

    /// Report progress while hashing large files.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// Minimum time between two progress reports for the same file, in milliseconds.
    #[builder(default = "3000")]
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,

    /// Read buffer size in bytes.
    #[builder(default = "1024 * 1024")]
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Capacity of the queue between the scanner and the workers.
    #[builder(default = "100")]
    #[serde(default = "default_queue_capacity")]
    pub path_queue_capacity: usize,

    /// Capacity of the queue between the workers and the aggregator.
    #[builder(default = "100")]
    #[serde(default = "default_queue_capacity")]
    pub result_queue_capacity: usize,

    /// Digest algorithms to compute, in sidecar order.
    #[builder(default = "Algorithm::ALL.to_vec()")]
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<Algorithm>,

    /// Extension appended to the source path to name the sidecar.
    #[builder(default = "default_sidecar_extension()")]
    #[serde(default = "default_sidecar_extension")]
    pub sidecar_extension: String,

    /// Follow symbolic links while scanning.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

fn default_suffix() -> String {
    ".iso".to_string()
}

fn default_workers() -> usize {
    4
}

fn default_progress_interval_ms() -> u64 {
    3000
}

fn default_chunk_size() -> usize {
    1024 * 1024
}

fn default_queue_capacity() -> usize {
    100
}

fn default_algorithms() -> Vec<Algorithm> {
    Algorithm::ALL.to_vec()
}

fn default_sidecar_extension() -> String {
    "toml".to_string()
}

impl HashConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            _ => {}
        }
        if self.workers == Some(0) {
            return Err("Worker count must be at least 1".to_string());
        }
        if self.chunk_size == Some(0) {
            return Err("Chunk size must be at least 1 byte".to_string());
        }
        if self.path_queue_capacity == Some(0) || self.result_queue_capacity == Some(0) {
            return Err("Queue capacity must be at least 1".to_string());
        }
        if let Some(ref algorithms) = self.algorithms {
            if algorithms.is_empty() {
                return Err("At least one digest algorithm is required".to_string());
            }
        }
        if let Some(ref ext) = self.sidecar_extension {
            if ext.is_empty() {
                return Err("Sidecar extension cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl HashConfig {
    /// Create a new config builder.
    pub fn builder() -> HashConfigBuilder {
        HashConfigBuilder::default()
    }

    /// Create a config with defaults for everything but the root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            suffix: default_suffix(),
            workers: default_workers(),
            skip_existing: true,
            show_progress: true,
            progress_interval_ms: default_progress_interval_ms(),
            chunk_size: default_chunk_size(),
            path_queue_capacity: default_queue_capacity(),
            result_queue_capacity: default_queue_capacity(),
            algorithms: default_algorithms(),
            sidecar_extension: default_sidecar_extension(),
            follow_symlinks: false,
        }
    }

    /// Minimum time between progress reports.
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    /// Check whether a file name matches the suffix filter.
    pub fn matches_suffix(&self, name: &str) -> bool {
        if self.suffix.is_empty() {
            return true;
        }
        name.to_lowercase().ends_with(&self.suffix.to_lowercase())
    }

    /// Path of the sidecar for a source file: the source path with
    /// `.<sidecar_extension>` appended.
    pub fn sidecar_path(&self, source: &Path) -> PathBuf {
        let mut name = OsString::from(source.as_os_str());
        name.push(".");
        name.push(&self.sidecar_extension);
        PathBuf::from(name)
    }

    /// Check a config that did not come through the builder, such as one
    /// deserialized from a file.
    pub fn validate(&self) -> Result<(), ScanError> {
        let message = if self.root.as_os_str().is_empty() {
            "Root path cannot be empty"
        } else if self.workers == 0 {
            "Worker count must be at least 1"
        } else if self.chunk_size == 0 {
            "Chunk size must be at least 1 byte"
        } else if self.path_queue_capacity == 0 || self.result_queue_capacity == 0 {
            "Queue capacity must be at least 1"
        } else if self.algorithms.is_empty() {
            "At least one digest algorithm is required"
        } else if self.sidecar_extension.is_empty() {
            "Sidecar extension cannot be empty"
        } else {
            return Ok(());
        };
        Err(ScanError::InvalidConfig {
            message: message.to_string(),
        })
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
