//! Hashing worker: turns one path into one outcome.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, warn};

use isohash_core::{DigestReport, FileError, HashConfig, HashProgress, WorkOutcome};
use isohash_digest::DigestSet;
use isohash_sidecar::MetadataWriter;

use crate::progress::ProgressReporter;

/// One member of the worker pool.
///
/// A worker owns nothing shared except references; every path it receives
/// produces exactly one [`WorkOutcome`].
pub struct HashWorker<'a> {
    id: usize,
    config: &'a HashConfig,
    writer: &'a dyn MetadataWriter,
    progress: &'a ProgressReporter,
}

impl<'a> HashWorker<'a> {
    pub fn new(
        id: usize,
        config: &'a HashConfig,
        writer: &'a dyn MetadataWriter,
        progress: &'a ProgressReporter,
    ) -> Self {
        Self {
            id,
            config,
            writer,
            progress,
        }
    }

    /// Worker identifier used in logs and progress.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Consume paths until the queue is closed and drained.
    ///
    /// Returns the number of outcomes emitted.
    pub fn run(&self, paths: Receiver<PathBuf>, results: Sender<WorkOutcome>) -> u64 {
        debug!(worker = self.id, "Worker started");
        let mut emitted = 0;
        for path in paths.iter() {
            let outcome = self.process(path);
            if results.send(outcome).is_err() {
                warn!(worker = self.id, "Result queue closed early");
                break;
            }
            emitted += 1;
        }
        debug!(worker = self.id, emitted, "Worker finished");
        emitted
    }

    /// Handle a single path.
    pub fn process(&self, path: PathBuf) -> WorkOutcome {
        let sidecar = self.config.sidecar_path(&path);

        if self.config.skip_existing && sidecar.exists() {
            debug!(
                worker = self.id,
                "Skipping {}: sidecar already exists",
                path.display()
            );
            return WorkOutcome::Skipped { path, sidecar };
        }

        debug!(worker = self.id, "Processing {}", path.display());

        let result = self.hash_file(&path).and_then(|(size, report)| {
            let name = file_name(&path);
            self.writer.write(&sidecar, &name, size, &report)?;
            Ok((size, report))
        });

        match result {
            Ok((size, report)) => {
                debug!(
                    worker = self.id,
                    "Wrote {} for {}",
                    sidecar.display(),
                    path.display()
                );
                WorkOutcome::Processed {
                    path,
                    sidecar,
                    size,
                    report,
                }
            }
            Err(error) => {
                warn!(worker = self.id, "Error processing {}: {error}", path.display());
                WorkOutcome::Error { path, error }
            }
        }
    }

    /// Stream the file through a fresh digest set.
    ///
    /// The reported size is the byte count actually consumed.
    fn hash_file(&self, path: &Path) -> Result<(u64, DigestReport), FileError> {
        let mut file = File::open(path).map_err(|source| FileError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let total = file
            .metadata()
            .map_err(|source| FileError::Metadata {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        let mut digests = DigestSet::new(&self.config.algorithms);
        let mut buffer = vec![0u8; self.config.chunk_size];
        let mut ticker = self.progress.ticker();

        loop {
            let n = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(FileError::Read {
                        path: path.to_path_buf(),
                        offset: digests.bytes(),
                        source,
                    });
                }
            };
            digests.absorb(&buffer[..n]);

            // The final report below covers completion.
            if self.progress.is_enabled() && digests.bytes() < total && ticker.tick() {
                self.progress
                    .report(HashProgress::new(self.id, path, digests.bytes(), total));
            }
        }

        let consumed = digests.bytes();
        if consumed != total {
            warn!(
                worker = self.id,
                "Size of {} changed while hashing: expected {total} bytes, read {consumed}",
                path.display()
            );
        }
        self.progress
            .report(HashProgress::new(self.id, path, consumed, consumed));

        Ok((consumed, digests.finalize()))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    use isohash_core::Algorithm;
    use isohash_sidecar::{SidecarRecord, TomlSidecarWriter};
    use tempfile::TempDir;
    use tokio::sync::broadcast;

    fn config(root: &Path) -> HashConfig {
        HashConfig::builder()
            .root(root)
            .chunk_size(4usize)
            .algorithms(vec![Algorithm::Sha256, Algorithm::Blake3])
            .build()
            .unwrap()
    }

    #[test]
    fn test_process_writes_sidecar() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.iso");
        fs::write(&path, b"0123456789").unwrap();

        let config = config(temp.path());
        let writer = TomlSidecarWriter::new();
        let progress = ProgressReporter::disabled();
        let worker = HashWorker::new(0, &config, &writer, &progress);

        let outcome = worker.process(path.clone());
        match outcome {
            WorkOutcome::Processed { size, sidecar, .. } => {
                assert_eq!(size, 10);
                let record = SidecarRecord::read(&sidecar).unwrap();
                assert_eq!(record.filename, "a.iso");
                assert_eq!(record.size, 10);
                assert_eq!(record.hashes.len(), 2);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_skip_does_not_open_source() {
        let temp = TempDir::new().unwrap();
        // The source does not exist, so opening it would fail.
        let path = temp.path().join("ghost.iso");
        fs::write(temp.path().join("ghost.iso.toml"), "keep").unwrap();

        let config = config(temp.path());
        let writer = TomlSidecarWriter::new();
        let progress = ProgressReporter::disabled();
        let worker = HashWorker::new(0, &config, &writer, &progress);

        assert!(worker.process(path).is_skipped());
        assert_eq!(
            fs::read_to_string(temp.path().join("ghost.iso.toml")).unwrap(),
            "keep"
        );
    }

    #[test]
    fn test_missing_source_is_open_error() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let writer = TomlSidecarWriter::new();
        let progress = ProgressReporter::disabled();
        let worker = HashWorker::new(0, &config, &writer, &progress);

        match worker.process(temp.path().join("missing.iso")) {
            WorkOutcome::Error { error, .. } => {
                assert!(matches!(error, FileError::Open { .. }));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!temp.path().join("missing.iso.toml").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_source_is_read_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("folder.iso");
        fs::create_dir(&path).unwrap();

        let config = config(temp.path());
        let writer = TomlSidecarWriter::new();
        let progress = ProgressReporter::disabled();
        let worker = HashWorker::new(0, &config, &writer, &progress);

        match worker.process(path) {
            WorkOutcome::Error { error, .. } => {
                assert!(matches!(error, FileError::Read { offset: 0, .. }));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!temp.path().join("folder.iso.toml").exists());
    }

    #[test]
    fn test_progress_ends_at_complete() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.iso");
        fs::write(&path, b"0123456789").unwrap();

        let config = config(temp.path());
        let writer = TomlSidecarWriter::new();
        let (tx, mut rx) = broadcast::channel(64);
        let progress = ProgressReporter::new(tx, true, Duration::ZERO);
        let worker = HashWorker::new(3, &config, &writer, &progress);
        assert_eq!(worker.id(), 3);

        assert!(worker.process(path).is_processed());

        let mut seen = Vec::new();
        while let Ok(p) = rx.try_recv() {
            seen.push(p);
        }
        assert!(seen.len() >= 2);
        assert!(seen.iter().all(|p| p.worker == 3));
        assert!(
            seen.windows(2)
                .all(|w| w[0].bytes_processed <= w[1].bytes_processed)
        );
        let last = seen.last().unwrap();
        assert!(last.is_complete());
        assert_eq!(last.bytes_total, 10);
    }

    #[test]
    fn test_single_complete_report_when_chunks_align() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.iso");
        fs::write(&path, b"01234567").unwrap();

        let config = config(temp.path());
        let writer = TomlSidecarWriter::new();
        let (tx, mut rx) = broadcast::channel(64);
        let progress = ProgressReporter::new(tx, true, Duration::ZERO);
        let worker = HashWorker::new(1, &config, &writer, &progress);

        assert!(worker.process(path).is_processed());

        let mut seen = Vec::new();
        while let Ok(p) = rx.try_recv() {
            seen.push(p);
        }
        let processed: Vec<u64> = seen.iter().map(|p| p.bytes_processed).collect();
        assert_eq!(processed, vec![4, 8]);
        assert_eq!(seen.iter().filter(|p| p.is_complete()).count(), 1);
        assert!(seen.last().unwrap().is_complete());
    }

    #[test]
    fn test_empty_file_reports_complete() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.iso");
        fs::write(&path, b"").unwrap();

        let config = config(temp.path());
        let writer = TomlSidecarWriter::new();
        let (tx, mut rx) = broadcast::channel(8);
        let progress = ProgressReporter::new(tx, true, Duration::ZERO);
        let worker = HashWorker::new(0, &config, &writer, &progress);

        assert!(worker.process(path).is_processed());
        let last = rx.try_recv().unwrap();
        assert_eq!(last.percentage(), 100.0);
    }
}
