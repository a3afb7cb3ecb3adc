//! Sidecar persistence.

use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use chrono::Local;
use tracing::debug;

use isohash_core::{DigestReport, FileError};

use crate::record::SidecarRecord;

/// Persists a finished digest pass next to its source file.
pub trait MetadataWriter: Send + Sync {
    /// Write the sidecar for `source_name` to `sidecar`.
    fn write(
        &self,
        sidecar: &Path,
        source_name: &str,
        size: u64,
        report: &DigestReport,
    ) -> Result<(), FileError>;
}

/// Writes human-readable TOML sidecars.
///
/// The record is written to a temporary file in the sidecar's directory and
/// renamed into place, so a failed write never leaves a partial sidecar.
/// On unix the sidecar gets the same mode as any newly created file.
#[derive(Debug, Clone)]
pub struct TomlSidecarWriter {
    generator: String,
}

impl TomlSidecarWriter {
    /// Create a writer that signs records with the default generator name.
    pub fn new() -> Self {
        Self {
            generator: format!("isohash {}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the generator line written in the header.
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Render the complete sidecar text: comment header plus TOML body.
    pub fn render(&self, record: &SidecarRecord, sidecar: &Path) -> Result<String, FileError> {
        let body = record.to_toml().map_err(|e| FileError::Serialize {
            path: sidecar.to_path_buf(),
            message: e.to_string(),
        })?;
        let generated = Local::now().format("%Y-%m-%d %H:%M:%S");
        Ok(format!(
            "# Generated on: {generated}\n# By {}\n{body}",
            self.generator
        ))
    }
}

impl Default for TomlSidecarWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataWriter for TomlSidecarWriter {
    fn write(
        &self,
        sidecar: &Path,
        source_name: &str,
        size: u64,
        report: &DigestReport,
    ) -> Result<(), FileError> {
        let record = SidecarRecord::new(source_name, size, report);
        let text = self.render(&record, sidecar)?;

        let write_error = |source: std::io::Error| FileError::Write {
            path: sidecar.to_path_buf(),
            source,
        };

        let dir = sidecar
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut builder = tempfile::Builder::new();
        // Same mode as a plain create; the umask still applies.
        #[cfg(unix)]
        builder.permissions(std::fs::Permissions::from_mode(0o666));
        let mut temp = builder.tempfile_in(dir).map_err(write_error)?;
        temp.write_all(text.as_bytes()).map_err(write_error)?;
        temp.flush().map_err(write_error)?;
        temp.persist(sidecar).map_err(|e| write_error(e.error))?;

        debug!(path = %sidecar.display(), "Wrote sidecar");
        Ok(())
    }
}
