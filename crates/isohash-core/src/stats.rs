//! Aggregate run statistics.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::outcome::WorkOutcome;

/// Counters accumulated by the single aggregation consumer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Files hashed with a sidecar written.
    pub processed: u64,
    /// Files skipped because a sidecar already existed.
    pub skipped: u64,
    /// Files or traversal entries that failed.
    pub errored: u64,
}

impl AggregateStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one outcome.
    pub fn record(&mut self, outcome: &WorkOutcome) {
        match outcome {
            WorkOutcome::Processed { .. } => self.processed += 1,
            WorkOutcome::Skipped { .. } => self.skipped += 1,
            WorkOutcome::Error { .. } => self.errored += 1,
        }
    }

    /// Total number of outcomes counted.
    pub fn total(&self) -> u64 {
        self.processed + self.skipped + self.errored
    }

    /// Check if any outcome was an error.
    pub fn has_errors(&self) -> bool {
        self.errored > 0
    }
}

/// A failed path as reported in the run summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Path that failed.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
}

/// Final report of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Root directory that was scanned.
    pub root: PathBuf,
    /// Number of workers used.
    pub workers: usize,
    /// Outcome counters.
    pub stats: AggregateStats,
    /// Total bytes hashed across processed files.
    pub bytes_hashed: u64,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
    /// Every failed path, in the order outcomes arrived.
    pub failures: Vec<FailureRecord>,
}

impl RunSummary {
    /// Check if the run finished without errors.
    pub fn is_success(&self) -> bool {
        !self.stats.has_errors()
    }

    /// One-line summary of the counters.
    pub fn summary(&self) -> String {
        format!(
            "Processed {} files, Skipped {} files, Encountered {} errors",
            self.stats.processed, self.stats.skipped, self.stats.errored
        )
    }
}
