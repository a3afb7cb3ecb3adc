//! Core types for isohash.
//!
//! This crate provides the data model shared by the scanner, the digest set,
//! the sidecar writer and the hashing pipeline: configuration, per-file
//! outcomes, digest reports, progress observations and run statistics.

mod algorithm;
mod config;
mod digest;
mod error;
mod outcome;
mod progress;
mod stats;

pub use algorithm::Algorithm;
pub use config::{HashConfig, HashConfigBuilder};
pub use digest::{DigestReport, DigestValue};
pub use error::{FileError, ScanError};
pub use outcome::WorkOutcome;
pub use progress::HashProgress;
pub use stats::{AggregateStats, FailureRecord, RunSummary};
