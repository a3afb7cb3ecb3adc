//! JWalk-based producer of candidate file paths.

use std::path::{Path, PathBuf};

use jwalk::{DirEntryIter, Parallelism, WalkDir};
use tracing::{debug, warn};

use isohash_core::{FileError, HashConfig, ScanError};

use crate::progress::{ScanStats, ScanTracker};

/// Produces the paths of every regular file under a root whose name ends
/// with the configured suffix.
#[derive(Debug, Clone)]
pub struct PathProducer {
    root: PathBuf,
    config: HashConfig,
}

impl PathProducer {
    /// Create a producer for the config's root.
    ///
    /// Fails if the root does not exist or is not a directory. This is the
    /// only fatal scan error; everything after it is reported per entry.
    pub fn new(config: &HashConfig) -> Result<Self, ScanError> {
        let root = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        if !root.is_dir() {
            return Err(ScanError::NotADirectory { path: root });
        }

        Ok(Self {
            root,
            config: config.clone(),
        })
    }

    /// Canonical root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a lazy, single-pass walk.
    pub fn walk(&self) -> PathIter {
        // Hashing dominates a run; the walk stays on the caller's thread.
        let walker = WalkDir::new(&self.root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(self.config.follow_symlinks)
            .min_depth(0);

        PathIter {
            inner: walker.into_iter(),
            config: self.config.clone(),
            tracker: ScanTracker::new(),
            finished: false,
        }
    }
}

/// Iterator over matching paths. Traversal failures are yielded as
/// [`FileError::Traversal`] and the walk continues.
pub struct PathIter {
    inner: DirEntryIter<((), ())>,
    config: HashConfig,
    tracker: ScanTracker,
    finished: bool,
}

impl PathIter {
    /// Counters so far; final once the iterator returns `None`.
    pub fn stats(&self) -> ScanStats {
        self.tracker.snapshot()
    }
}

impl Iterator for PathIter {
    type Item = Result<PathBuf, FileError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(entry_result) = self.inner.next() else {
                if !self.finished {
                    self.finished = true;
                    self.tracker.finish();
                    let stats = self.tracker.snapshot();
                    debug!(
                        files = stats.files_seen,
                        matched = stats.files_matched,
                        dirs = stats.dirs_seen,
                        errors = stats.errors,
                        "Scan finished"
                    );
                }
                return None;
            };

            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    warn!(path = %path.display(), error = %err, "Error accessing path");
                    self.tracker.record_error();
                    return Some(Err(FileError::Traversal {
                        path,
                        message: err.to_string(),
                    }));
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                self.tracker.record_dir();
                // jwalk yields the directory itself and parks the read_dir failure on it
                if let Some(err) = entry.read_children_error.as_ref() {
                    let path = entry.path();
                    warn!(path = %path.display(), error = %err, "Error accessing path");
                    self.tracker.record_error();
                    return Some(Err(FileError::Traversal {
                        path,
                        message: err.to_string(),
                    }));
                }
                continue;
            }
            if !file_type.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            let matched = self.config.matches_suffix(&name);
            self.tracker.record_file(matched);
            if matched {
                return Some(Ok(entry.path()));
            }
        }
    }
}
