//! Exact and lossy byte encodings of polynomials.
//!
//! Every encoding packs fixed-width values least significant bit first, and
//! canonicalizes the coefficients before packing, so lazily reduced
//! polynomials serialize to the same bytes as their reduced form.

use super::{Poly, PolyVec, Representation, N};
use crate::zq::{reduce, Q};
use crate::{Error, Result};
use pre_traits::Serialize;
use pre_util::{transcode_from_bytes, transcode_to_bytes};

/// Size in bytes of an exactly serialized polynomial (12 bits per coefficient).
pub const POLY_BYTES: usize = 12 * N / 8;

/// Size in bytes of a message encoded in one polynomial.
pub const MSG_BYTES: usize = N / 8;

/// Size in bytes of a polynomial compressed to `d` bits per coefficient.
pub const fn compressed_size(d: usize) -> usize {
    d * N / 8
}

fn canonical(p: &Poly) -> [u16; N] {
    let mut out = [0u16; N];
    out.iter_mut()
        .zip(p.coeffs.iter())
        .for_each(|(o, c)| *o = reduce(*c) as u16);
    out
}

/// Round (2^d / q) · x to the nearest integer, modulo 2^d.
#[inline]
fn compress_coefficient(x: u16, d: usize) -> u16 {
    ((((x as u32) << d) + (Q as u32) / 2) / Q as u32 & ((1 << d) - 1)) as u16
}

/// Round (q / 2^d) · y to the nearest integer.
#[inline]
fn decompress_coefficient(y: u16, d: usize) -> i16 {
    ((y as u32 * Q as u32 + (1 << (d - 1))) >> d) as i16
}

impl Serialize for Poly {
    fn to_bytes(&self) -> Vec<u8> {
        transcode_to_bytes(&canonical(self), 12)
    }
}

impl Poly {
    /// Deserialize a polynomial serialized with 12 bits per coefficient.
    ///
    /// The coefficients are not checked to be smaller than q.
    pub fn from_bytes(bytes: &[u8], representation: Representation) -> Result<Self> {
        if bytes.len() != POLY_BYTES {
            return Err(Error::InvalidLength(POLY_BYTES, bytes.len()));
        }
        let values = transcode_from_bytes(bytes, 12, N)
            .ok_or(Error::InvalidLength(POLY_BYTES, bytes.len()))?;
        let mut p = Poly::zero(representation);
        p.coeffs
            .iter_mut()
            .zip(values)
            .for_each(|(c, v)| *c = v as i16);
        Ok(p)
    }

    /// Lossy compression to `d` bits per coefficient.
    ///
    /// Aborts if the polynomial is not in `PowerBasis` representation in debug
    /// mode.
    pub fn compress(&self, d: usize) -> Vec<u8> {
        debug_assert_eq!(self.representation, Representation::PowerBasis);
        debug_assert!((1..=11).contains(&d));

        let compressed = canonical(self).map(|x| compress_coefficient(x, d));
        transcode_to_bytes(&compressed, d)
    }

    /// Decompress a polynomial compressed to `d` bits per coefficient.
    pub fn decompress(bytes: &[u8], d: usize) -> Result<Self> {
        let size = compressed_size(d);
        if bytes.len() != size {
            return Err(Error::InvalidLength(size, bytes.len()));
        }
        let values =
            transcode_from_bytes(bytes, d, N).ok_or(Error::InvalidLength(size, bytes.len()))?;
        let mut p = Poly::zero(Representation::PowerBasis);
        p.coeffs
            .iter_mut()
            .zip(values)
            .for_each(|(c, v)| *c = decompress_coefficient(v, d));
        Ok(p)
    }

    /// Encode a 32-byte message, bit i of the message mapping coefficient i to
    /// 0 or ⌈q/2⌉.
    pub fn from_message(msg: &[u8; MSG_BYTES]) -> Self {
        let mut p = Poly::zero(Representation::PowerBasis);
        for (i, byte) in msg.iter().enumerate() {
            for j in 0..8 {
                let mask = -(((byte >> j) & 1) as i16);
                p.coeffs[8 * i + j] = mask & ((Q + 1) / 2);
            }
        }
        p
    }

    /// Decode a message: bit i is set when coefficient i is closer to q/2
    /// than to 0.
    pub fn to_message(&self) -> [u8; MSG_BYTES] {
        debug_assert_eq!(self.representation, Representation::PowerBasis);

        let mut msg = [0u8; MSG_BYTES];
        for (i, chunk) in canonical(self).chunks_exact(8).enumerate() {
            for (j, x) in chunk.iter().enumerate() {
                msg[i] |= (compress_coefficient(*x, 1) as u8) << j;
            }
        }
        msg
    }
}

impl Serialize for PolyVec {
    fn to_bytes(&self) -> Vec<u8> {
        self.iter().flat_map(|p| p.to_bytes()).collect()
    }
}

impl PolyVec {
    /// Deserialize `k` polynomials serialized with 12 bits per coefficient.
    pub fn from_bytes(bytes: &[u8], k: usize, representation: Representation) -> Result<Self> {
        if bytes.len() != k * POLY_BYTES {
            return Err(Error::InvalidLength(k * POLY_BYTES, bytes.len()));
        }
        let polys = bytes
            .chunks_exact(POLY_BYTES)
            .map(|chunk| Poly::from_bytes(chunk, representation))
            .collect::<Result<Vec<_>>>()?;
        Ok(PolyVec::from(polys))
    }

    /// Lossy compression of every polynomial to `d` bits per coefficient.
    pub fn compress(&self, d: usize) -> Vec<u8> {
        self.iter().flat_map(|p| p.compress(d)).collect()
    }

    /// Decompress `k` polynomials compressed to `d` bits per coefficient.
    pub fn decompress(bytes: &[u8], k: usize, d: usize) -> Result<Self> {
        let size = compressed_size(d);
        if bytes.len() != k * size {
            return Err(Error::InvalidLength(k * size, bytes.len()));
        }
        let polys = bytes
            .chunks_exact(size)
            .map(|chunk| Poly::decompress(chunk, d))
            .collect::<Result<Vec<_>>>()?;
        Ok(PolyVec::from(polys))
    }
}
