//! Single-pass multi-algorithm digests for isohash.
//!
//! A [`DigestSet`] owns one live state per algorithm and feeds every state
//! from the same buffer:
//!
//! - **Fixed-output hashes**: SHA-256, SHA-512, Whirlpool, RIPEMD-160,
//!   SHA3-256, BLAKE2b-256
//! - **BLAKE3** with its default 32-byte output
//! - **KangarooTwelve**, an extendable-output function read out to 32 bytes
//!
//! ```rust
//! use isohash_digest::{Algorithm, DigestSet};
//!
//! let mut set = DigestSet::new(&[Algorithm::Sha256, Algorithm::Blake3]);
//! set.absorb(b"hello ");
//! set.absorb(b"world");
//! let report = set.finalize();
//!
//! assert_eq!(report.bytes, 11);
//! assert_eq!(report.get(Algorithm::Sha256).unwrap().len(), 32);
//! ```

mod primitive;
mod set;

pub use primitive::{StreamingDigest, new_digest};
pub use set::{DigestSet, digest_bytes};

// Re-export core types
pub use isohash_core::{Algorithm, DigestReport, DigestValue};
