//! Number-Theoretic Transform over Z_q[x]/(x^256 + 1).
//!
//! Since q - 1 = 2^8 · 13, Z_q only contains 256-th roots of unity; the
//! transform therefore stops one level early and represents a polynomial as
//! 128 residues modulo degree-2 polynomials x^2 - ζ^(2·bitrev(i)+1).

mod native;

pub use native::{backward, base_mul, forward, ROOT_OF_UNITY, ZETAS};

/// Number of coefficients handled by the transform.
pub const DEGREE: usize = 256;
