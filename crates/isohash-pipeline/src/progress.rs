//! Best-effort progress reporting for digest passes.

use std::time::{Duration, Instant};

use humansize::{BINARY, format_size};
use tokio::sync::broadcast;
use tracing::info;

use isohash_core::HashProgress;

/// Fans progress observations out to subscribers and the log.
///
/// Sending never blocks: a broadcast with no receivers, or with lagging
/// receivers, simply drops or overwrites observations.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    tx: broadcast::Sender<HashProgress>,
    enabled: bool,
    interval: Duration,
}

impl ProgressReporter {
    /// Create a reporter publishing on `tx`.
    pub fn new(tx: broadcast::Sender<HashProgress>, enabled: bool, interval: Duration) -> Self {
        Self {
            tx,
            enabled,
            interval,
        }
    }

    /// A reporter that never emits anything.
    pub fn disabled() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self::new(tx, false, Duration::MAX)
    }

    /// Whether reporting is turned on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start rate limiting for one file.
    pub fn ticker(&self) -> ProgressTicker {
        ProgressTicker {
            last: Instant::now(),
            interval: self.interval,
        }
    }

    /// Publish one observation.
    pub fn report(&self, progress: HashProgress) {
        if !self.enabled {
            return;
        }
        if progress.is_complete() {
            info!(
                worker = progress.worker,
                "Processing {}: 100.0% complete ({})",
                progress.file_name(),
                format_size(progress.bytes_total, BINARY)
            );
        } else {
            info!(
                worker = progress.worker,
                "Processing {}: {:.1}% complete ({} / {})",
                progress.file_name(),
                progress.percentage(),
                format_size(progress.bytes_processed, BINARY),
                format_size(progress.bytes_total, BINARY)
            );
        }
        let _ = self.tx.send(progress);
    }
}

/// Per-file rate limiter for interim progress reports.
#[derive(Debug)]
pub struct ProgressTicker {
    last: Instant,
    interval: Duration,
}

impl ProgressTicker {
    /// Returns true at most once per interval.
    pub fn tick(&mut self) -> bool {
        if self.last.elapsed() >= self.interval {
            self.last = Instant::now();
            true
        } else {
            false
        }
    }
}
