//! Implementation of operations over polynomials.

use super::Poly;
use crate::zq::barrett_reduce;
use itertools::izip;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

impl AddAssign<&Poly> for Poly {
    fn add_assign(&mut self, p: &Poly) {
        assert_eq!(
            self.representation, p.representation,
            "Incompatible representations"
        );
        izip!(self.coeffs.iter_mut(), p.coeffs.iter())
            .for_each(|(x, y)| *x = barrett_reduce(barrett_reduce(*x) + barrett_reduce(*y)));
    }
}

impl Add<&Poly> for &Poly {
    type Output = Poly;
    fn add(self, p: &Poly) -> Poly {
        let mut q = self.clone();
        q += p;
        q
    }
}

impl Add for Poly {
    type Output = Poly;
    fn add(self, p: Poly) -> Poly {
        let mut q = self;
        q += &p;
        q
    }
}

impl SubAssign<&Poly> for Poly {
    fn sub_assign(&mut self, p: &Poly) {
        assert_eq!(
            self.representation, p.representation,
            "Incompatible representations"
        );
        izip!(self.coeffs.iter_mut(), p.coeffs.iter())
            .for_each(|(x, y)| *x = barrett_reduce(barrett_reduce(*x) - barrett_reduce(*y)));
    }
}

impl Sub<&Poly> for &Poly {
    type Output = Poly;
    fn sub(self, p: &Poly) -> Poly {
        let mut q = self.clone();
        q -= p;
        q
    }
}

impl Sub for Poly {
    type Output = Poly;
    fn sub(self, p: Poly) -> Poly {
        let mut q = self;
        q -= &p;
        q
    }
}

impl Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        let mut out = self.clone();
        out.coeffs
            .iter_mut()
            .for_each(|x| *x = -barrett_reduce(*x));
        out
    }
}

impl Neg for Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        -&self
    }
}
