use super::DEGREE;
use crate::zq::{barrett_reduce, fqmul, MONT, Q};

/// A primitive 256-th root of unity modulo q.
pub const ROOT_OF_UNITY: i16 = 17;

/// Twiddle factors: `ZETAS[i] = R · 17^bitrev7(i) mod q`, centered.
pub const ZETAS: [i16; 128] = zetas();

/// R^2 / 128 mod q: undoes the factor 128 of the inverse transform and the
/// R^-1 of the final Montgomery multiplication, leaving one factor R.
const BACKWARD_SCALE: i16 = 1441;

const fn zetas() -> [i16; 128] {
    let mut powers = [0i32; 128];
    let mut acc = MONT as i32;
    let mut i = 0;
    while i < 128 {
        powers[i] = acc;
        acc = acc * (ROOT_OF_UNITY as i32) % (Q as i32);
        i += 1;
    }

    let mut out = [0i16; 128];
    let mut i: usize = 0;
    while i < 128 {
        let j = i.reverse_bits() >> (usize::BITS - 7);
        let mut zeta = powers[j];
        if zeta > (Q as i32) / 2 {
            zeta -= Q as i32;
        }
        out[i] = zeta as i16;
        i += 1;
    }
    out
}

/// Compute the forward NTT in place.
///
/// The input coefficients must be smaller than q in absolute value; the output
/// is in bit-reversed order, with coefficients smaller than 8q in absolute
/// value.
pub fn forward(a: &mut [i16; DEGREE]) {
    debug_assert!(a.iter().all(|ai| ai.abs() < Q));

    let mut k = 1;
    let mut len = DEGREE >> 1;
    while len >= 2 {
        for start in (0..DEGREE).step_by(2 * len) {
            let zeta = ZETAS[k];
            k += 1;
            for j in start..start + len {
                let t = fqmul(zeta, a[j + len]);
                a[j + len] = a[j] - t;
                a[j] += t;
            }
        }
        len >>= 1;
    }
}

/// Compute the backward NTT in place, multiplying the output by the Montgomery
/// factor R.
///
/// Takes input in bit-reversed order; the output coefficients are smaller than
/// q in absolute value.
pub fn backward(a: &mut [i16; DEGREE]) {
    let mut k = 127;
    let mut len = 2;
    while len <= DEGREE >> 1 {
        for start in (0..DEGREE).step_by(2 * len) {
            let zeta = ZETAS[k];
            k -= 1;
            for j in start..start + len {
                let t = a[j];
                a[j] = barrett_reduce(t + a[j + len]);
                a[j + len] = fqmul(zeta, a[j + len] - t);
            }
        }
        len <<= 1;
    }

    a.iter_mut()
        .for_each(|ai| *ai = fqmul(*ai, BACKWARD_SCALE));
}

/// Pointwise product of two transformed polynomials.
///
/// Each pair of coefficients is a residue modulo x^2 - ζ; the result carries an
/// extra factor R^-1.
pub fn base_mul(r: &mut [i16; DEGREE], a: &[i16; DEGREE], b: &[i16; DEGREE]) {
    for i in 0..DEGREE / 4 {
        let zeta = ZETAS[64 + i];
        let j = 4 * i;
        (r[j], r[j + 1]) = base_mul_pair(a[j], a[j + 1], b[j], b[j + 1], zeta);
        (r[j + 2], r[j + 3]) = base_mul_pair(a[j + 2], a[j + 3], b[j + 2], b[j + 3], -zeta);
    }
}

/// Multiplication of a0 + a1·x and b0 + b1·x modulo x^2 - ζ.
#[inline]
fn base_mul_pair(a0: i16, a1: i16, b0: i16, b1: i16, zeta: i16) -> (i16, i16) {
    let r0 = fqmul(fqmul(a1, b1), zeta) + fqmul(a0, b0);
    let r1 = fqmul(a0, b1) + fqmul(a1, b0);
    (r0, r1)
}
