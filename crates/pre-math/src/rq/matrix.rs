//! The public k × k matrix of module-LWE.

use super::{Poly, PolyVec};
use crate::xof::{ByteStream, Shake128Stream};
use crate::{Error, Result};
use tracing::trace;

/// A square matrix of polynomials in `Ntt` representation, stored by rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: Box<[PolyVec]>,
}

impl Matrix {
    /// Expand the k × k matrix A (or its transpose) from a 32-byte seed.
    ///
    /// Entry (i, j) is sampled from SHAKE128(seed ‖ j ‖ i), or from
    /// SHAKE128(seed ‖ i ‖ j) when `transposed` is set.
    pub fn generate(seed: &[u8; 32], k: usize, transposed: bool) -> Result<Self> {
        Self::generate_from(k, transposed, |x, y| Shake128Stream::new(seed, x, y))
    }

    /// Expand a k × k matrix, reading entry (i, j) from the stream returned by
    /// `stream(x, y)` with the same index convention as [`Matrix::generate`].
    pub fn generate_from<S, F>(k: usize, transposed: bool, mut stream: F) -> Result<Self>
    where
        S: ByteStream,
        F: FnMut(u8, u8) -> S,
    {
        if k == 0 || k > u8::MAX as usize {
            return Err(Error::Default(format!("Invalid matrix rank {k}")));
        }
        trace!(k, transposed, "expanding matrix");

        let rows = (0..k)
            .map(|i| {
                let row = (0..k)
                    .map(|j| {
                        let (x, y) = if transposed { (i, j) } else { (j, i) };
                        Poly::uniform(&mut stream(x as u8, y as u8))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(PolyVec::from(row))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            rows: rows.into_boxed_slice(),
        })
    }

    /// The rank k of the matrix.
    pub fn rank(&self) -> usize {
        self.rows.len()
    }

    /// Returns row `i`.
    pub fn row(&self, i: usize) -> &PolyVec {
        &self.rows[i]
    }

    /// Iterate over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &PolyVec> {
        self.rows.iter()
    }

    /// Matrix-vector product for a vector in `Ntt` representation.
    ///
    /// The output is in `NttMontgomery` representation.
    pub fn mul_vec(&self, v: &PolyVec) -> Result<PolyVec> {
        let polys = self
            .rows()
            .map(|row| row.dot_product(v))
            .collect::<Result<Vec<_>>>()?;
        Ok(PolyVec::from(polys))
    }
}
