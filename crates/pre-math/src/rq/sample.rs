//! Sampling of uniform and small polynomials.

use super::{Poly, PolyVec, Representation, N};
use crate::xof::{prf, ByteStream, SHAKE128_RATE};
use crate::zq::Q;
use crate::{Error, Result};
use pre_util::cbd_from_bytes;
use zeroize::Zeroizing;

/// Sequential nonces for the noise PRF.
///
/// A counter hands out 0, 1, ..., 255 and then fails rather than wrapping, so
/// that a (seed, nonce) pair is never used twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonceCounter {
    next: Option<u8>,
}

impl NonceCounter {
    /// A counter starting at 0.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// A counter starting at `nonce`.
    pub fn starting_at(nonce: u8) -> Self {
        Self { next: Some(nonce) }
    }

    /// Returns the next nonce.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<u8> {
        let nonce = self.next.ok_or(Error::NonceExhausted)?;
        self.next = nonce.checked_add(1);
        Ok(nonce)
    }

    /// Returns the next four nonces.
    pub fn next_x4(&mut self) -> Result<[u8; 4]> {
        Ok([self.next()?, self.next()?, self.next()?, self.next()?])
    }
}

impl Default for NonceCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Poly {
    /// Sample a polynomial with coefficients uniform in [0, q) by rejection
    /// sampling on 12-bit values read from `stream`.
    ///
    /// The stream is consumed in blocks of 168 bytes, as many as needed. The
    /// output is taken to be in `Ntt` representation. Returns
    /// [`Error::SamplerStarvation`] if the stream runs dry first.
    pub fn uniform<S: ByteStream + ?Sized>(stream: &mut S) -> Result<Self> {
        let mut p = Poly::zero(Representation::Ntt);
        let mut ctr = 0;

        // Up to two leftover bytes are carried over between blocks.
        let mut buf = [0u8; SHAKE128_RATE + 2];
        let mut len = 0;
        while ctr < N {
            let n = stream.fill(&mut buf[len..len + SHAKE128_RATE]);
            len += n;

            let mut pos = 0;
            while ctr < N && pos + 3 <= len {
                let (b0, b1, b2) = (buf[pos] as u16, buf[pos + 1] as u16, buf[pos + 2] as u16);
                pos += 3;

                let v0 = (b0 | (b1 << 8)) & 0xfff;
                let v1 = ((b1 >> 4) | (b2 << 4)) & 0xfff;
                if v0 < Q as u16 {
                    p.coeffs[ctr] = v0 as i16;
                    ctr += 1;
                }
                if ctr < N && v1 < Q as u16 {
                    p.coeffs[ctr] = v1 as i16;
                    ctr += 1;
                }
            }
            buf.copy_within(pos..len, 0);
            len -= pos;

            if ctr < N && n < SHAKE128_RATE {
                return Err(Error::SamplerStarvation);
            }
        }
        Ok(p)
    }

    /// Sample a polynomial with coefficients following the centered binomial
    /// distribution CBD_η, from SHAKE256(seed ‖ nonce).
    ///
    /// The output is in `PowerBasis` representation.
    pub fn small(seed: &[u8; 32], nonce: u8, eta: usize) -> Self {
        debug_assert!((1..=3).contains(&eta));

        let mut buf = Zeroizing::new(vec![0u8; eta * N / 4]);
        prf(seed, nonce, &mut buf);
        let mut p = Poly::zero(Representation::PowerBasis);
        cbd_from_bytes(&buf, eta, &mut p.coeffs);
        p
    }

    /// Sample four small polynomials at once; equal to four calls to
    /// [`Poly::small`] with the successive nonces.
    pub fn small_x4(seed: &[u8; 32], nonces: [u8; 4], eta: usize) -> [Self; 4] {
        nonces.map(|nonce| Self::small(seed, nonce, eta))
    }
}

impl PolyVec {
    /// Sample `k` small polynomials, drawing their nonces from `counter`.
    pub fn small(
        seed: &[u8; 32],
        counter: &mut NonceCounter,
        k: usize,
        eta: usize,
    ) -> Result<Self> {
        let polys = (0..k)
            .map(|_| counter.next().map(|nonce| Poly::small(seed, nonce, eta)))
            .collect::<Result<Vec<_>>>()?;
        Ok(PolyVec::from(polys))
    }
}
