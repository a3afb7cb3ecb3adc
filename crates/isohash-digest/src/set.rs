//! Ordered set of digests fed from a single read.

use std::io::{self, Write};

use indexmap::IndexMap;
use isohash_core::{Algorithm, DigestReport};

use crate::primitive::{StreamingDigest, new_digest};

/// An ordered list of live digest states sharing one input stream.
///
/// Each chunk passed to [`DigestSet::absorb`] is fed to every member, so a
/// file is read from disk once no matter how many algorithms are active.
pub struct DigestSet {
    digests: Vec<Box<dyn StreamingDigest>>,
    bytes: u64,
}

impl DigestSet {
    /// Create a set for the given algorithms. Duplicates are dropped; the
    /// first occurrence fixes the position.
    pub fn new(algorithms: &[Algorithm]) -> Self {
        let mut digests: Vec<Box<dyn StreamingDigest>> = Vec::with_capacity(algorithms.len());
        for &algorithm in algorithms {
            if digests.iter().all(|d| d.algorithm() != algorithm) {
                digests.push(new_digest(algorithm));
            }
        }
        Self { digests, bytes: 0 }
    }

    /// Create a set with every supported algorithm, in sidecar order.
    pub fn standard() -> Self {
        Self::new(&Algorithm::ALL)
    }

    /// Feed one chunk to every digest.
    pub fn absorb(&mut self, chunk: &[u8]) {
        for digest in &mut self.digests {
            digest.absorb(chunk);
        }
        self.bytes += chunk.len() as u64;
    }

    /// Bytes absorbed so far.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Algorithms in this set, in order.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        self.digests.iter().map(|d| d.algorithm()).collect()
    }

    /// Number of digests in the set.
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    /// Whether the set has no digests.
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    /// Finalize every digest.
    pub fn finalize(self) -> DigestReport {
        let bytes = self.bytes;
        let digests: IndexMap<_, _> = self
            .digests
            .into_iter()
            .map(|digest| (digest.algorithm(), digest.finalize()))
            .collect();
        DigestReport::new(digests, bytes)
    }
}

impl Default for DigestSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for DigestSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestSet")
            .field("algorithms", &self.algorithms())
            .field("bytes", &self.bytes)
            .finish()
    }
}

impl Write for DigestSet {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.absorb(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Digest an in-memory buffer with the given algorithms.
pub fn digest_bytes(algorithms: &[Algorithm], data: &[u8]) -> DigestReport {
    let mut set = DigestSet::new(algorithms);
    set.absorb(data);
    set.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_are_dropped() {
        let set = DigestSet::new(&[Algorithm::Sha256, Algorithm::Blake3, Algorithm::Sha256]);
        assert_eq!(set.algorithms(), vec![Algorithm::Sha256, Algorithm::Blake3]);
    }

    #[test]
    fn test_report_order_follows_set() {
        let report = digest_bytes(&[Algorithm::Blake3, Algorithm::Ripemd160], b"data");
        let order: Vec<Algorithm> = report.digests.keys().copied().collect();
        assert_eq!(order, vec![Algorithm::Blake3, Algorithm::Ripemd160]);
        assert_eq!(report.bytes, 4);
    }

    #[test]
    fn test_write_impl_counts_bytes() {
        let mut set = DigestSet::new(&[Algorithm::Sha256]);
        std::io::copy(&mut &b"0123456789"[..], &mut set).unwrap();
        assert_eq!(set.bytes(), 10);
    }
}
