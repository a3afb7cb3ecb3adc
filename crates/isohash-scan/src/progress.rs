//! Scan counters.

use std::time::{Duration, Instant};

/// Counters for a single traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Regular files visited, matching or not.
    pub files_seen: u64,
    /// Directories visited, including the root.
    pub dirs_seen: u64,
    /// Files whose name matched the suffix filter.
    pub files_matched: u64,
    /// Entries that could not be read.
    pub errors: u64,
    /// Time spent walking, set when the walk is exhausted.
    pub elapsed: Duration,
}

impl ScanStats {
    /// Total paths handed out by the scanner, successes and errors alike.
    pub fn items_produced(&self) -> u64 {
        self.files_matched + self.errors
    }
}

/// Internal counter with timing.
#[derive(Debug)]
pub(crate) struct ScanTracker {
    start_time: Instant,
    stats: ScanStats,
}

impl ScanTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            stats: ScanStats::default(),
        }
    }

    pub fn record_file(&mut self, matched: bool) {
        self.stats.files_seen += 1;
        if matched {
            self.stats.files_matched += 1;
        }
    }

    pub fn record_dir(&mut self) {
        self.stats.dirs_seen += 1;
    }

    pub fn record_error(&mut self) {
        self.stats.errors += 1;
    }

    pub fn finish(&mut self) {
        self.stats.elapsed = self.start_time.elapsed();
    }

    pub fn snapshot(&self) -> ScanStats {
        self.stats.clone()
    }
}
