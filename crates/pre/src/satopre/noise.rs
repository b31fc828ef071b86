//! Matrices of small polynomials.

use crate::{Error, NoiseDistribution, PreParameters, Result};
use ndarray::{Array2, ShapeBuilder};
use pre_math::rq::{NonceCounter, Poly, PolyVec, Representation};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number ℓ = ⌈log₂ q⌉ of column blocks of a noise matrix.
pub const NOISE_MATRIX_COLUMNS: usize = 12;

/// A k × kℓ matrix of small polynomials, stored as a k × ℓ array of vectors
/// of k polynomials; each vector is one column of the matrix.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NoiseMatrix {
    entries: Array2<PolyVec>,
}

impl NoiseMatrix {
    /// Sample a noise matrix from `seed`, with coefficients following the
    /// distribution `distribution` of the parameters.
    ///
    /// The nonces are drawn from `counter` block column by block column, and
    /// within a block column entry by entry.
    pub fn sample(
        par: &PreParameters,
        seed: &[u8; 32],
        distribution: NoiseDistribution,
        counter: &mut NonceCounter,
    ) -> Result<Self> {
        let k = par.rank();
        let eta = par.eta(distribution);
        let count = k * k * NOISE_MATRIX_COLUMNS;

        let mut polys = Vec::with_capacity(count);
        while polys.len() + 4 <= count {
            polys.extend(Poly::small_x4(seed, counter.next_x4()?, eta));
        }
        while polys.len() < count {
            polys.push(Poly::small(seed, counter.next()?, eta));
        }

        let columns = polys
            .chunks_exact(k)
            .map(|chunk| PolyVec::from(chunk.to_vec()))
            .collect::<Vec<_>>();
        polys.zeroize();
        let entries = Array2::from_shape_vec((k, NOISE_MATRIX_COLUMNS).f(), columns)
            .map_err(|e| Error::DefaultError(e.to_string()))?;
        Ok(Self { entries })
    }

    /// Returns the k × ℓ array of column vectors.
    pub fn entries(&self) -> &Array2<PolyVec> {
        &self.entries
    }

    /// Change the representation of every polynomial.
    pub(crate) fn change_representation(&mut self, to: Representation) {
        self.entries
            .iter_mut()
            .for_each(|v| v.change_representation(to));
    }
}

impl Zeroize for NoiseMatrix {
    fn zeroize(&mut self) {
        self.entries.iter_mut().for_each(|v| v.zeroize());
    }
}

impl ZeroizeOnDrop for NoiseMatrix {}

impl Drop for NoiseMatrix {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::{NoiseMatrix, NOISE_MATRIX_COLUMNS};
    use crate::{NoiseDistribution, PreParameters};
    use pre_math::rq::{NonceCounter, Poly};
    use std::error::Error as StdError;

    #[test]
    fn shape_and_nonces() -> Result<(), Box<dyn StdError>> {
        let seed = [3u8; 32];
        for rank in 2..=4 {
            let par = PreParameters::default_arc(rank);
            let mut counter = NonceCounter::new();
            let r = NoiseMatrix::sample(&par, &seed, NoiseDistribution::Eta1, &mut counter)?;
            assert_eq!(r.entries().dim(), (rank, NOISE_MATRIX_COLUMNS));
            assert!(r.entries().iter().all(|v| v.len() == rank));

            // Entry (i, j) holds the nonces (j·k + i)·k, ..., (j·k + i)·k + k - 1.
            let (i, j) = (rank - 1, 5);
            let base = ((j * rank + i) * rank) as u8;
            for m in 0..rank {
                assert_eq!(
                    r.entries()[(i, j)][m],
                    Poly::small(&seed, base + m as u8, par.eta1())
                );
            }

            let used = (rank * rank * NOISE_MATRIX_COLUMNS) as u8;
            assert_eq!(counter.next()?, used);
        }
        Ok(())
    }

    #[test]
    fn distributions() -> Result<(), Box<dyn StdError>> {
        let par = PreParameters::default_arc(2);
        let seed = [4u8; 32];
        let r1 = NoiseMatrix::sample(
            &par,
            &seed,
            NoiseDistribution::Eta1,
            &mut Default::default(),
        )?;
        let r2 = NoiseMatrix::sample(
            &par,
            &seed,
            NoiseDistribution::Eta2,
            &mut Default::default(),
        )?;
        assert_ne!(r1, r2);
        for (r, eta) in [(&r1, 3i16), (&r2, 2)] {
            assert!(r
                .entries()
                .iter()
                .flat_map(|v| v.iter())
                .all(|p| p.coefficients().iter().all(|c| c.abs() <= eta)));
        }
        Ok(())
    }

    #[test]
    fn nonce_exhaustion() {
        let par = PreParameters::default_arc(4);
        let mut counter = NonceCounter::starting_at(100);
        assert!(
            NoiseMatrix::sample(&par, &[0u8; 32], NoiseDistribution::Eta2, &mut counter).is_err()
        );
    }
}
