//! Arithmetic modulo q = 3329 on signed 16-bit representatives.
//!
//! Values are kept lazily reduced: most operations accept any `i16` and return
//! a representative that is only guaranteed to be congruent to the result.
//! [`reduce`] is the single place where coefficients become canonical.

/// The modulus q.
pub const Q: i16 = 3329;

/// q^-1 mod 2^16, as a signed value.
pub const QINV: i16 = -3327;

/// The Montgomery radix R = 2^16, reduced modulo q.
pub const MONT: i16 = 2285;

/// R^2 mod q, used to move a value into the Montgomery domain.
pub const MONT_SQUARED: i16 = 1353;

/// Montgomery reduction.
///
/// Given |a| < q·2^15, returns a·R^-1 mod q in (-q, q).
#[inline]
pub const fn montgomery_reduce(a: i32) -> i16 {
    let t = (a as i16).wrapping_mul(QINV);
    ((a - (t as i32) * (Q as i32)) >> 16) as i16
}

/// Barrett reduction.
///
/// Returns the centered representative of a modulo q, in [-(q-1)/2, (q-1)/2].
#[inline]
pub const fn barrett_reduce(a: i16) -> i16 {
    const V: i32 = ((1 << 26) + (Q as i32) / 2) / (Q as i32);
    let t = (V * a as i32 + (1 << 25)) >> 26;
    (a as i32 - t * (Q as i32)) as i16
}

/// Multiplication followed by Montgomery reduction: returns a·b·R^-1 mod q.
#[inline]
pub const fn fqmul(a: i16, b: i16) -> i16 {
    montgomery_reduce(a as i32 * b as i32)
}

/// Add q to a if a is negative, without branching.
#[inline]
pub const fn caddq(a: i16) -> i16 {
    a + ((a >> 15) & Q)
}

/// Canonical reduction of any `i16` into [0, q).
#[inline]
pub const fn reduce(a: i16) -> i16 {
    caddq(barrett_reduce(a))
}

#[cfg(test)]
mod tests {
    use super::{barrett_reduce, caddq, fqmul, montgomery_reduce, reduce, MONT, MONT_SQUARED, Q};
    use proptest::prelude::*;

    fn modq(a: i64) -> i64 {
        a.rem_euclid(Q as i64)
    }

    #[test]
    fn constants() {
        assert_eq!(modq(1 << 16), MONT as i64);
        assert_eq!(modq(1 << 32), MONT_SQUARED as i64);
        assert_eq!((super::QINV as i32 * Q as i32) & 0xffff, 1);
    }

    #[test]
    fn barrett_extremes() {
        for a in [i16::MIN, i16::MIN + 1, -Q, -1, 0, 1, Q - 1, Q, i16::MAX] {
            let r = barrett_reduce(a);
            assert!(r.abs() <= (Q - 1) / 2);
            assert_eq!(modq(r as i64), modq(a as i64));
        }
    }

    #[test]
    fn reduce_all() {
        for a in i16::MIN..=i16::MAX {
            let r = reduce(a);
            assert!((0..Q).contains(&r));
            assert_eq!(r as i64, modq(a as i64));
        }
    }

    #[test]
    fn caddq_range() {
        assert_eq!(caddq(-1), Q - 1);
        assert_eq!(caddq(0), 0);
        assert_eq!(caddq(Q - 1), Q - 1);
    }

    proptest! {
        #[test]
        fn montgomery(a in (-(Q as i32) * (1 << 15) + 1)..((Q as i32) * (1 << 15))) {
            let r = montgomery_reduce(a);
            prop_assert!(r > -Q && r < Q);
            prop_assert_eq!(modq(r as i64 * MONT as i64), modq(a as i64));
        }

        #[test]
        fn multiplication(a: i16, b: i16) {
            let r = fqmul(a, b);
            prop_assert_eq!(modq(r as i64 * MONT as i64), modq(a as i64 * b as i64));
        }
    }
}
