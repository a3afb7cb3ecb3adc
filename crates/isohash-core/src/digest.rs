//! Finalized digest values.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::algorithm::Algorithm;

/// Finalized output of one digest algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigestValue(pub Vec<u8>);

impl DigestValue {
    /// Create a digest value from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Get the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Output length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the output is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for DigestValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Result of a complete digest pass over one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestReport {
    /// Digests keyed by algorithm, in digest-set order.
    pub digests: IndexMap<Algorithm, DigestValue>,
    /// Number of bytes absorbed.
    pub bytes: u64,
}

impl DigestReport {
    /// Create a report.
    pub fn new(digests: IndexMap<Algorithm, DigestValue>, bytes: u64) -> Self {
        Self { digests, bytes }
    }

    /// Look up one algorithm's digest.
    pub fn get(&self, algorithm: Algorithm) -> Option<&DigestValue> {
        self.digests.get(&algorithm)
    }

    /// Algorithm identifiers mapped to lowercase hex, in digest-set order.
    pub fn hex_map(&self) -> IndexMap<String, String> {
        self.digests
            .iter()
            .map(|(algorithm, value)| (algorithm.name().to_string(), value.to_hex()))
            .collect()
    }

    /// Number of algorithms in the report.
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    /// Whether the report holds no digests.
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}
