//! Directory scanning for isohash.
//!
//! This crate walks a root directory with jwalk and yields the path of every
//! regular file whose name ends with the configured suffix.
//!
//! - **Lazy**: paths are produced one at a time as the walk advances
//! - **Case-insensitive** suffix matching (`.iso` matches `IMAGE.ISO`)
//! - **Non-fatal entry errors**: unreadable entries are yielded as errors and
//!   the walk continues; only a missing root is fatal
//!
//! # Example
//!
//! ```rust,no_run
//! use isohash_core::HashConfig;
//! use isohash_scan::PathProducer;
//!
//! let config = HashConfig::new("/mnt/isos");
//! let producer = PathProducer::new(&config).unwrap();
//!
//! for item in producer.walk() {
//!     match item {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(err) => eprintln!("{err}"),
//!     }
//! }
//! ```

mod progress;
mod scanner;

pub use progress::ScanStats;
pub use scanner::{PathIter, PathProducer};

// Re-export core types for convenience
pub use isohash_core::{FileError, HashConfig, ScanError};
