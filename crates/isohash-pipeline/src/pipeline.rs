//! Worker pool coordination.
//!
//! Shape of a run:
//!
//! ```text
//!  producer ──paths──▶ worker 0..N ──outcomes──▶ aggregator
//!      └──────────── traversal errors ──────────────▲
//! ```
//!
//! The path queue closes when the producer finishes. The outcome queue
//! closes only after every worker has been joined, so the aggregator sees
//! every outcome before it reports.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, ScopedJoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, bounded};
use humansize::{BINARY, format_size};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use isohash_core::{
    AggregateStats, FailureRecord, HashConfig, HashProgress, RunSummary, WorkOutcome,
};
use isohash_scan::{PathProducer, ScanStats};
use isohash_sidecar::{MetadataWriter, TomlSidecarWriter};

use crate::PROGRESS_CHANNEL_SIZE;
use crate::error::PipelineError;
use crate::progress::ProgressReporter;
use crate::worker::HashWorker;

/// Runs a complete hashing pass over a directory tree.
pub struct HashPipeline {
    config: HashConfig,
    writer: Arc<dyn MetadataWriter>,
    progress_tx: broadcast::Sender<HashProgress>,
}

impl HashPipeline {
    /// Create a pipeline writing TOML sidecars.
    pub fn new(config: HashConfig) -> Self {
        let (progress_tx, _) = broadcast::channel(PROGRESS_CHANNEL_SIZE);
        Self {
            config,
            writer: Arc::new(TomlSidecarWriter::new()),
            progress_tx,
        }
    }

    /// Replace the sidecar writer.
    pub fn with_writer(mut self, writer: Arc<dyn MetadataWriter>) -> Self {
        self.writer = writer;
        self
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Subscribe to progress observations.
    ///
    /// Delivery is best effort. A slow subscriber sees `Lagged` rather than
    /// slowing the workers down.
    pub fn subscribe(&self) -> broadcast::Receiver<HashProgress> {
        self.progress_tx.subscribe()
    }

    /// Run to completion.
    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        self.run_with(|_| {})
    }

    /// Run to completion, handing every outcome to `observer` as the
    /// aggregator receives it.
    pub fn run_with<F>(&self, observer: F) -> Result<RunSummary, PipelineError>
    where
        F: FnMut(&WorkOutcome) + Send,
    {
        let start = Instant::now();
        self.config.validate()?;
        let producer = PathProducer::new(&self.config)?;
        let workers = self.config.workers;

        info!(
            "Starting ISO hashing in directory {} with {} workers",
            producer.root().display(),
            workers
        );

        let reporter = ProgressReporter::new(
            self.progress_tx.clone(),
            self.config.show_progress,
            self.config.progress_interval(),
        );
        let writer: &dyn MetadataWriter = self.writer.as_ref();
        let config = &self.config;
        let producer = &producer;

        let (path_tx, path_rx) = bounded::<PathBuf>(config.path_queue_capacity);
        let (result_tx, result_rx) = bounded::<WorkOutcome>(config.result_queue_capacity);

        let (tally, scan) = thread::scope(|scope| -> Result<_, PipelineError> {
            let aggregator = thread::Builder::new()
                .name("hash-aggregator".into())
                .spawn_scoped(scope, move || aggregate(result_rx, observer))
                .map_err(|source| spawn_error("aggregator", source))?;

            let mut handles = Vec::with_capacity(workers);
            for id in 0..workers {
                let paths = path_rx.clone();
                let results = result_tx.clone();
                let worker = HashWorker::new(id, config, writer, &reporter);
                let spawned = thread::Builder::new()
                    .name(format!("hash-worker-{}", worker.id()))
                    .spawn_scoped(scope, move || worker.run(paths, results));
                match spawned {
                    Ok(handle) => handles.push((id, handle)),
                    Err(source) => {
                        drop(path_tx);
                        drop(result_tx);
                        join_all(handles.into_iter().map(|(_, h)| h));
                        let _ = aggregator.join();
                        return Err(spawn_error(&format!("worker {id}"), source));
                    }
                }
            }
            drop(path_rx);

            let traversal_results = result_tx.clone();
            let spawned = thread::Builder::new()
                .name("path-producer".into())
                .spawn_scoped(scope, move || produce(producer, path_tx, traversal_results));
            let producer_handle = match spawned {
                Ok(handle) => handle,
                Err(source) => {
                    drop(result_tx);
                    join_all(handles.into_iter().map(|(_, h)| h));
                    let _ = aggregator.join();
                    return Err(spawn_error("producer", source));
                }
            };

            let scan = producer_handle
                .join()
                .map_err(|_| PipelineError::ProducerPanicked);

            let mut panicked = None;
            for (id, handle) in handles {
                match handle.join() {
                    Ok(emitted) => debug!(worker = id, emitted, "Worker joined"),
                    Err(_) => {
                        error!(worker = id, "Worker panicked");
                        panicked.get_or_insert(id);
                    }
                }
            }

            // Last sender: closing it lets the aggregator finish.
            drop(result_tx);
            let tally = aggregator
                .join()
                .map_err(|_| PipelineError::AggregatorPanicked)?;

            if let Some(id) = panicked {
                return Err(PipelineError::WorkerPanicked { id });
            }
            Ok((tally, scan?))
        })?;

        if tally.stats.total() != scan.items_produced() {
            warn!(
                produced = scan.items_produced(),
                recorded = tally.stats.total(),
                "Outcome count does not match traversal"
            );
        }

        let summary = RunSummary {
            root: producer.root().to_path_buf(),
            workers,
            stats: tally.stats,
            bytes_hashed: tally.bytes_hashed,
            elapsed: start.elapsed(),
            failures: tally.failures,
        };

        info!("{}", summary.summary());
        info!(
            "Hashed {} in {:.2?}",
            format_size(summary.bytes_hashed, BINARY),
            summary.elapsed
        );
        Ok(summary)
    }
}

/// Totals built by the aggregator.
#[derive(Debug, Default)]
struct Tally {
    stats: AggregateStats,
    bytes_hashed: u64,
    failures: Vec<FailureRecord>,
}

/// Walk the tree, feeding paths to workers and traversal errors straight to
/// the aggregator.
fn produce(
    producer: &PathProducer,
    paths: Sender<PathBuf>,
    results: Sender<WorkOutcome>,
) -> ScanStats {
    let mut iter = producer.walk();
    for item in iter.by_ref() {
        let delivered = match item {
            Ok(path) => {
                debug!(path = %path.display(), "Queued");
                paths.send(path).is_ok()
            }
            Err(error) => results.send(WorkOutcome::from_error(error)).is_ok(),
        };
        if !delivered {
            warn!("Pipeline stopped accepting work, ending traversal");
            break;
        }
    }
    let stats = iter.stats();
    debug!(
        matched = stats.files_matched,
        errors = stats.errors,
        dirs = stats.dirs_seen,
        elapsed = ?stats.elapsed,
        "Traversal finished"
    );
    stats
}

fn aggregate<F>(results: Receiver<WorkOutcome>, mut observer: F) -> Tally
where
    F: FnMut(&WorkOutcome),
{
    let mut tally = Tally::default();
    for outcome in results.iter() {
        tally.stats.record(&outcome);
        match &outcome {
            WorkOutcome::Processed { size, .. } => tally.bytes_hashed += size,
            WorkOutcome::Skipped { .. } => {}
            WorkOutcome::Error { path, error } => tally.failures.push(FailureRecord {
                path: path.clone(),
                message: error.to_string(),
            }),
        }
        observer(&outcome);
    }
    tally
}

fn join_all<'scope, T>(handles: impl IntoIterator<Item = ScopedJoinHandle<'scope, T>>) {
    for handle in handles {
        let _ = handle.join();
    }
}

fn spawn_error(name: &str, source: std::io::Error) -> PipelineError {
    PipelineError::Spawn {
        name: name.to_string(),
        source,
    }
}
