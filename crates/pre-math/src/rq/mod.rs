//! Polynomials in R_q = Z_q[x]/(x^256 + 1).

mod matrix;
mod ops;
mod polyvec;
mod sample;
mod serialize;

pub use matrix::Matrix;
pub use polyvec::PolyVec;
pub use sample::NonceCounter;
pub use serialize::{compressed_size, MSG_BYTES, POLY_BYTES};

use crate::ntt;
use crate::zq::{barrett_reduce, fqmul, montgomery_reduce, reduce, MONT_SQUARED};
use crate::{Error, Result};
use std::fmt::Debug;
use zeroize::Zeroize;

/// Number of coefficients of a polynomial.
pub const N: usize = ntt::DEGREE;

/// Possible representations of the underlying polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// This is the list of coefficients ai, such that the polynomial is
    /// a0 + a1 * x + ... + a_255 * x^255.
    PowerBasis,
    /// This is the NTT representation of the polynomial.
    Ntt,
    /// This is the NTT representation of the polynomial multiplied by R^-1,
    /// which is how pointwise products come out of Montgomery arithmetic.
    NttMontgomery,
}

/// Struct that holds a polynomial.
#[derive(Clone, PartialEq, Eq)]
pub struct Poly {
    pub(crate) coeffs: [i16; N],
    pub(crate) representation: Representation,
}

impl Debug for Poly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poly")
            .field("representation", &self.representation)
            // .field("coeffs", &self.coeffs)
            .finish()
    }
}

impl Zeroize for Poly {
    fn zeroize(&mut self) {
        self.coeffs.zeroize();
    }
}

impl Poly {
    /// Creates a polynomial holding the constant 0.
    pub fn zero(representation: Representation) -> Self {
        Self {
            coeffs: [0; N],
            representation,
        }
    }

    /// Creates a polynomial from its coefficients in a given representation.
    pub fn from_coefficients(coeffs: [i16; N], representation: Representation) -> Self {
        Self {
            coeffs,
            representation,
        }
    }

    /// Returns the coefficients of the polynomial. They are only guaranteed to
    /// be in [0, q) after [`Poly::reduce`].
    pub fn coefficients(&self) -> &[i16; N] {
        &self.coeffs
    }

    /// Current representation of the polynomial.
    pub const fn representation(&self) -> &Representation {
        &self.representation
    }

    /// Reduce every coefficient into [0, q).
    pub fn reduce(&mut self) {
        self.coeffs.iter_mut().for_each(|c| *c = reduce(*c));
    }

    /// Returns whether every coefficient is in [0, q).
    pub fn is_reduced(&self) -> bool {
        self.coeffs.iter().all(|c| (0..crate::zq::Q).contains(c))
    }

    /// Change the representation of the underlying polynomial.
    ///
    /// Moving from `PowerBasis` to `Ntt` leaves the coefficients reduced; the
    /// other transitions only guarantee coefficients smaller than q in absolute
    /// value.
    pub fn change_representation(&mut self, to: Representation) {
        match (self.representation, to) {
            (Representation::PowerBasis, Representation::PowerBasis)
            | (Representation::Ntt, Representation::Ntt)
            | (Representation::NttMontgomery, Representation::NttMontgomery) => {}
            (Representation::PowerBasis, _) => {
                self.coeffs
                    .iter_mut()
                    .for_each(|c| *c = barrett_reduce(*c));
                ntt::forward(&mut self.coeffs);
                self.reduce();
                self.representation = Representation::Ntt;
                self.change_representation(to);
            }
            (Representation::Ntt, Representation::PowerBasis) => {
                ntt::backward(&mut self.coeffs);
                self.scale_by_mont_inverse();
            }
            (Representation::Ntt, Representation::NttMontgomery) => {
                self.scale_by_mont_inverse();
            }
            (Representation::NttMontgomery, Representation::PowerBasis) => {
                ntt::backward(&mut self.coeffs);
            }
            (Representation::NttMontgomery, Representation::Ntt) => {
                self.coeffs
                    .iter_mut()
                    .for_each(|c| *c = montgomery_reduce(*c as i32 * MONT_SQUARED as i32));
            }
        }
        self.representation = to;
    }

    /// Multiply every coefficient by R^-1.
    fn scale_by_mont_inverse(&mut self) {
        self.coeffs.iter_mut().for_each(|c| *c = fqmul(*c, 1));
    }

    /// Pointwise product of two polynomials in `Ntt` representation.
    ///
    /// The product is in `NttMontgomery` representation.
    pub fn base_mul(&self, other: &Self) -> Result<Self> {
        for p in [self, other] {
            if p.representation != Representation::Ntt {
                return Err(Error::IncorrectRepresentation(
                    p.representation,
                    Representation::Ntt,
                ));
            }
        }

        let mut out = Self::zero(Representation::NttMontgomery);
        ntt::base_mul(&mut out.coeffs, &self.coeffs, &other.coeffs);
        Ok(out)
    }
}
