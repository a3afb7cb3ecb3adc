//! Sidecar record contents.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use isohash_core::{DigestReport, FileError};

/// Body of a sidecar file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidecarRecord {
    /// File name of the source, without its directory.
    pub filename: String,
    /// Source size in bytes.
    pub size: u64,
    /// Lowercase hex digests keyed by algorithm identifier.
    pub hashes: IndexMap<String, String>,
}

impl SidecarRecord {
    /// Build a record from a finished digest pass.
    pub fn new(filename: impl Into<String>, size: u64, report: &DigestReport) -> Self {
        Self {
            filename: filename.into(),
            size,
            hashes: report.hex_map(),
        }
    }

    /// Render the TOML body.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Parse a sidecar file. Comment lines are ignored.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read and parse a sidecar from disk.
    pub fn read(path: &Path) -> Result<Self, FileError> {
        let text = std::fs::read_to_string(path).map_err(|source| FileError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|e| FileError::Serialize {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
