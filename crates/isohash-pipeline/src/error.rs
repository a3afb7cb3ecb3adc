//! Run-level errors.

use thiserror::Error;

use isohash_core::ScanError;

/// Errors that abort a whole run.
///
/// Per-file failures never show up here; they are reported as
/// [`isohash_core::WorkOutcome::Error`] and counted.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The run could not start.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A pipeline thread could not be spawned.
    #[error("Failed to spawn {name} thread: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A worker thread panicked.
    #[error("Worker {id} panicked")]
    WorkerPanicked { id: usize },

    /// The traversal thread panicked.
    #[error("Path producer panicked")]
    ProducerPanicked,

    /// The result aggregator panicked.
    #[error("Result aggregator panicked")]
    AggregatorPanicked,
}
