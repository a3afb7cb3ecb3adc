//! Streaming digest primitives.
//!
//! Every algorithm is wrapped behind [`StreamingDigest`] so a digest set can
//! hold a heterogeneous, ordered list of them and feed each one the same
//! buffer.

use blake2::Blake2b;
use blake2::digest::consts::U32;
use k12::KangarooTwelve;
use k12::digest::{ExtendableOutput, Update, XofReader};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use sha3::Sha3_256;
use whirlpool::Whirlpool;

use isohash_core::{Algorithm, DigestValue};

/// A digest that absorbs bytes incrementally and finalizes once.
pub trait StreamingDigest: Send {
    /// Algorithm this primitive implements.
    fn algorithm(&self) -> Algorithm;

    /// Absorb the next chunk of input.
    fn absorb(&mut self, data: &[u8]);

    /// Consume the state and produce the fixed-length output.
    fn finalize(self: Box<Self>) -> DigestValue;
}

/// Create a fresh primitive for an algorithm.
pub fn new_digest(algorithm: Algorithm) -> Box<dyn StreamingDigest> {
    match algorithm {
        Algorithm::Sha256 => Box::new(FixedDigest::new(algorithm, Sha256::new())),
        Algorithm::Sha512 => Box::new(FixedDigest::new(algorithm, Sha512::new())),
        Algorithm::Whirlpool => Box::new(FixedDigest::new(algorithm, Whirlpool::new())),
        Algorithm::Ripemd160 => Box::new(FixedDigest::new(algorithm, Ripemd160::new())),
        Algorithm::Sha3_256 => Box::new(FixedDigest::new(algorithm, Sha3_256::new())),
        Algorithm::Blake2b => Box::new(FixedDigest::new(algorithm, Blake2b::<U32>::new())),
        Algorithm::Kangaroo12 => Box::new(XofDigest::new(
            algorithm,
            KangarooTwelve::default(),
            algorithm.output_len(),
        )),
        Algorithm::Blake3 => Box::new(Blake3Digest(blake3::Hasher::new())),
    }
}

/// Any fixed-output RustCrypto hash.
struct FixedDigest<D> {
    algorithm: Algorithm,
    inner: D,
}

impl<D> FixedDigest<D> {
    fn new(algorithm: Algorithm, inner: D) -> Self {
        Self { algorithm, inner }
    }
}

impl<D: Digest + Send> StreamingDigest for FixedDigest<D> {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn absorb(&mut self, data: &[u8]) {
        Digest::update(&mut self.inner, data);
    }

    fn finalize(self: Box<Self>) -> DigestValue {
        DigestValue::new(Digest::finalize(self.inner).to_vec())
    }
}

/// An extendable-output function read out to a fixed length.
struct XofDigest<H> {
    algorithm: Algorithm,
    inner: H,
    output_len: usize,
}

impl<H> XofDigest<H> {
    fn new(algorithm: Algorithm, inner: H, output_len: usize) -> Self {
        Self {
            algorithm,
            inner,
            output_len,
        }
    }
}

impl<H: Update + ExtendableOutput + Send> StreamingDigest for XofDigest<H> {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn absorb(&mut self, data: &[u8]) {
        Update::update(&mut self.inner, data);
    }

    fn finalize(self: Box<Self>) -> DigestValue {
        let mut output = vec![0u8; self.output_len];
        let mut reader = self.inner.finalize_xof();
        reader.read(&mut output);
        DigestValue::new(output)
    }
}

/// BLAKE3 with its default 32-byte output.
struct Blake3Digest(blake3::Hasher);

impl StreamingDigest for Blake3Digest {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Blake3
    }

    fn absorb(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> DigestValue {
        DigestValue::new(self.0.finalize().as_bytes().to_vec())
    }
}
