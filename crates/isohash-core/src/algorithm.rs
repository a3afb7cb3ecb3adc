//! Digest algorithm identifiers.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// A digest algorithm that can be part of a digest set.
///
/// The string form (`Display`, `FromStr`, serde) is the key used in the
/// sidecar's `[hashes]` table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Algorithm {
    #[serde(rename = "sha256")]
    #[strum(serialize = "sha256")]
    Sha256,
    #[serde(rename = "sha512")]
    #[strum(serialize = "sha512")]
    Sha512,
    #[serde(rename = "whirlpool")]
    #[strum(serialize = "whirlpool")]
    Whirlpool,
    #[serde(rename = "ripemd160")]
    #[strum(serialize = "ripemd160")]
    Ripemd160,
    /// KangarooTwelve, read out to 32 bytes.
    #[serde(rename = "kangaroo12")]
    #[strum(serialize = "kangaroo12")]
    Kangaroo12,
    #[serde(rename = "sha3_256")]
    #[strum(serialize = "sha3_256")]
    Sha3_256,
    /// BLAKE2b with a 256-bit output.
    #[serde(rename = "blake2b")]
    #[strum(serialize = "blake2b")]
    Blake2b,
    #[serde(rename = "blake3")]
    #[strum(serialize = "blake3")]
    Blake3,
}

impl Algorithm {
    /// The full reference set, in sidecar order.
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Sha256,
        Algorithm::Sha512,
        Algorithm::Whirlpool,
        Algorithm::Ripemd160,
        Algorithm::Kangaroo12,
        Algorithm::Sha3_256,
        Algorithm::Blake2b,
        Algorithm::Blake3,
    ];

    /// Size of the finalized output in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Algorithm::Sha256 => 32,
            Algorithm::Sha512 => 64,
            Algorithm::Whirlpool => 64,
            Algorithm::Ripemd160 => 20,
            Algorithm::Kangaroo12 => 32,
            Algorithm::Sha3_256 => 32,
            Algorithm::Blake2b => 32,
            Algorithm::Blake3 => 32,
        }
    }

    /// Whether this is an extendable-output function truncated to a fixed length.
    pub fn is_xof(self) -> bool {
        matches!(self, Algorithm::Kangaroo12)
    }

    /// Identifier used as the sidecar key.
    pub fn name(self) -> &'static str {
        self.into()
    }
}
