//! TOML sidecar records for isohash.
//!
//! A sidecar sits next to its source file, named by appending `.toml` to the
//! source path:
//!
//! ```toml
//! # Generated on: 2025-05-21 10:42:07
//! # By isohash 0.1.0
//! filename = "debian-12.iso"
//! size = 658505728
//!
//! [hashes]
//! sha256 = "…"
//! blake3 = "…"
//! ```

mod record;
mod writer;

pub use record::SidecarRecord;
pub use writer::{MetadataWriter, TomlSidecarWriter};
