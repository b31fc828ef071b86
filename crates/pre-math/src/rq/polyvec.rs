//! Vectors of polynomials.

use super::{Poly, Representation};
use crate::{Error, Result};
use itertools::izip;
use std::ops::{AddAssign, Index, IndexMut, SubAssign};
use zeroize::Zeroize;

/// A vector of k polynomials, the module element of module-LWE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyVec {
    pub(crate) polys: Box<[Poly]>,
}

impl PolyVec {
    /// Creates a vector of `k` zero polynomials.
    pub fn zero(k: usize, representation: Representation) -> Self {
        Self {
            polys: vec![Poly::zero(representation); k].into_boxed_slice(),
        }
    }

    /// Number of polynomials in the vector.
    pub fn len(&self) -> usize {
        self.polys.len()
    }

    /// Returns whether the vector has no polynomial.
    pub fn is_empty(&self) -> bool {
        self.polys.is_empty()
    }

    /// Iterate over the polynomials.
    pub fn iter(&self) -> std::slice::Iter<'_, Poly> {
        self.polys.iter()
    }

    /// Iterate mutably over the polynomials.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Poly> {
        self.polys.iter_mut()
    }

    /// Reduce every coefficient of every polynomial into [0, q).
    pub fn reduce(&mut self) {
        self.polys.iter_mut().for_each(|p| p.reduce());
    }

    /// Change the representation of every polynomial.
    pub fn change_representation(&mut self, to: Representation) {
        self.polys
            .iter_mut()
            .for_each(|p| p.change_representation(to));
    }

    /// Inner product of two vectors in `Ntt` representation.
    ///
    /// The result is reduced and in `NttMontgomery` representation.
    pub fn dot_product(&self, other: &Self) -> Result<Poly> {
        if self.len() != other.len() {
            return Err(Error::Default(format!(
                "Mismatched vector lengths: {} and {}",
                self.len(),
                other.len()
            )));
        }

        let mut acc = Poly::zero(Representation::NttMontgomery);
        for (a, b) in izip!(self.iter(), other.iter()) {
            acc += &a.base_mul(b)?;
        }
        acc.reduce();
        Ok(acc)
    }
}

impl From<Vec<Poly>> for PolyVec {
    fn from(polys: Vec<Poly>) -> Self {
        Self {
            polys: polys.into_boxed_slice(),
        }
    }
}

impl Index<usize> for PolyVec {
    type Output = Poly;

    fn index(&self, index: usize) -> &Poly {
        &self.polys[index]
    }
}

impl IndexMut<usize> for PolyVec {
    fn index_mut(&mut self, index: usize) -> &mut Poly {
        &mut self.polys[index]
    }
}

impl AddAssign<&PolyVec> for PolyVec {
    fn add_assign(&mut self, v: &PolyVec) {
        assert_eq!(self.len(), v.len(), "Incompatible lengths");
        izip!(self.polys.iter_mut(), v.iter()).for_each(|(p, q)| *p += q);
    }
}

impl SubAssign<&PolyVec> for PolyVec {
    fn sub_assign(&mut self, v: &PolyVec) {
        assert_eq!(self.len(), v.len(), "Incompatible lengths");
        izip!(self.polys.iter_mut(), v.iter()).for_each(|(p, q)| *p -= q);
    }
}

impl Zeroize for PolyVec {
    fn zeroize(&mut self) {
        self.polys.iter_mut().for_each(|p| p.zeroize());
    }
}
