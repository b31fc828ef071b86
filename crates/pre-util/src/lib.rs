#![crate_name = "pre_util"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Utilities for the pre library.

use num_traits::{PrimInt, Unsigned};

/// Returns ⌈log₂(x)⌉.
///
/// Aborts if x = 0 in debug mode.
pub fn ceil_log2(x: u64) -> usize {
    debug_assert!(x > 0);
    if x <= 1 {
        0
    } else {
        (64 - (x - 1).leading_zeros()) as usize
    }
}

/// Pack the `nbits` least significant bits of each value into a little-endian
/// bit stream, least significant bit first.
///
/// The output has ⌈len·nbits/8⌉ bytes. Aborts in debug mode if a value does
/// not fit on `nbits` bits or if `nbits` is not between 1 and 16.
pub fn transcode_to_bytes<T: PrimInt + Unsigned>(a: &[T], nbits: usize) -> Vec<u8> {
    debug_assert!((1..=16).contains(&nbits));

    let mut out = Vec::with_capacity((a.len() * nbits).div_ceil(8));
    let mut acc = 0u32;
    let mut acc_bits = 0usize;
    for ai in a {
        let value = ai.to_u32().unwrap_or(u32::MAX);
        debug_assert!(value >> nbits == 0);

        acc |= value << acc_bits;
        acc_bits += nbits;
        while acc_bits >= 8 {
            out.push(acc as u8);
            acc >>= 8;
            acc_bits -= 8;
        }
    }
    if acc_bits > 0 {
        out.push(acc as u8);
    }
    out
}

/// Unpack `count` values of `nbits` bits from a little-endian bit stream,
/// least significant bit first. Inverse of [`transcode_to_bytes`].
///
/// Returns None if `b` is too short to hold `count` values.
pub fn transcode_from_bytes(b: &[u8], nbits: usize, count: usize) -> Option<Vec<u16>> {
    debug_assert!((1..=16).contains(&nbits));

    if b.len() * 8 < count * nbits {
        return None;
    }

    let mask = (1u32 << nbits) - 1;
    let mut out = Vec::with_capacity(count);
    let mut acc = 0u32;
    let mut acc_bits = 0usize;
    let mut bytes = b.iter();
    while out.len() < count {
        while acc_bits < nbits {
            // The length check above guarantees enough bytes.
            let byte = *bytes.next()? as u32;
            acc |= byte << acc_bits;
            acc_bits += 8;
        }
        out.push((acc & mask) as u16);
        acc >>= nbits;
        acc_bits -= nbits;
    }
    Some(out)
}

/// Decode centered binomial samples from uniform bytes.
///
/// Sample `i` is the popcount of bits `[2iη, 2iη + η)` minus the popcount of
/// bits `[2iη + η, 2(i+1)η)`, reading the buffer as a little-endian bit stream.
/// `buf` must hold at least `2·η·out.len()` bits. The computation does not
/// branch on the buffer contents.
pub fn cbd_from_bytes(buf: &[u8], eta: usize, out: &mut [i16]) {
    debug_assert!((1..=8).contains(&eta));
    debug_assert!(buf.len() * 8 >= 2 * eta * out.len());

    let bit = |index: usize| ((buf[index >> 3] >> (index & 7)) & 1) as i16;
    for (i, oi) in out.iter_mut().enumerate() {
        let offset = 2 * eta * i;
        let a: i16 = (0..eta).map(|j| bit(offset + j)).sum();
        let b: i16 = (0..eta).map(|j| bit(offset + eta + j)).sum();
        *oi = a - b;
    }
}
