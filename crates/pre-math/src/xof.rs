//! Extendable-output functions used by the samplers.
//!
//! Matrix entries are expanded from SHAKE128 and noise from SHAKE256. The
//! samplers read their input through [`ByteStream`], so that they can also be
//! driven by finite buffers.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake128Reader, Shake256};

/// Rate of SHAKE128 in bytes; the matrix sampler consumes one block at a time.
pub const SHAKE128_RATE: usize = 168;

/// A source of bytes for rejection sampling.
pub trait ByteStream {
    /// Fill `block` with the next bytes of the stream.
    ///
    /// Returns the number of bytes written, which is smaller than
    /// `block.len()` only once the stream is exhausted.
    fn fill(&mut self, block: &mut [u8]) -> usize;
}

/// The unbounded SHAKE128(seed ‖ x ‖ y) stream expanding one matrix entry.
pub struct Shake128Stream {
    reader: Shake128Reader,
}

impl Shake128Stream {
    /// Absorb `seed ‖ x ‖ y`.
    pub fn new(seed: &[u8], x: u8, y: u8) -> Self {
        let mut hasher = Shake128::default();
        hasher.update(seed);
        hasher.update(&[x, y]);
        Self {
            reader: hasher.finalize_xof(),
        }
    }
}

impl ByteStream for Shake128Stream {
    fn fill(&mut self, block: &mut [u8]) -> usize {
        self.reader.read(block);
        block.len()
    }
}

/// A finite stream reading from a byte slice.
impl ByteStream for &[u8] {
    fn fill(&mut self, block: &mut [u8]) -> usize {
        let n = block.len().min(self.len());
        block[..n].copy_from_slice(&self[..n]);
        *self = &self[n..];
        n
    }
}

/// The noise PRF: fill `out` with SHAKE256(seed ‖ nonce).
pub fn prf(seed: &[u8; 32], nonce: u8, out: &mut [u8]) {
    let mut hasher = Shake256::default();
    hasher.update(seed);
    hasher.update(&[nonce]);
    hasher.finalize_xof().read(out);
}
