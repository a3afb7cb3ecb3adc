//! Concurrent hashing pipeline for isohash.
//!
//! A single producer walks the tree and feeds matching paths into a bounded
//! queue. A fixed pool of [`HashWorker`]s consumes it, streams each file
//! through every digest once, writes a sidecar, and emits one
//! [`WorkOutcome`](isohash_core::WorkOutcome) per path. One aggregator turns
//! the outcomes into a [`RunSummary`](isohash_core::RunSummary).
//!
//! ```no_run
//! use isohash_core::HashConfig;
//! use isohash_pipeline::HashPipeline;
//!
//! let pipeline = HashPipeline::new(HashConfig::new("/srv/isos"));
//! let summary = pipeline.run()?;
//! println!("{}", summary.summary());
//! # Ok::<(), isohash_pipeline::PipelineError>(())
//! ```

mod error;
mod pipeline;
mod progress;
mod worker;

pub use error::PipelineError;
pub use pipeline::HashPipeline;
pub use progress::{ProgressReporter, ProgressTicker};
pub use worker::HashWorker;

/// Buffer size for progress subscriptions.
pub const PROGRESS_CHANNEL_SIZE: usize = 100;
