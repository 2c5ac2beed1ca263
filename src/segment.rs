//! Methods for dealing with segments of a segmented sieve represented in a
//! memory-efficient way.
//!
//! A segment represents the numbers in a given range which are prime. The
//! range must begin and end on a multiple of 240, due to the way that the
//! segment is represented internally, and is indexed from 0, so that the
//! zeroth element is the beginning of the range, and so on. In reality, the
//! only indices which make sense are those which are 1, 7, 11, 13, 17, 19,
//! 23 or 29 more than a multiple of 30 — any other index always reads as
//! `false`, matching the wheel-30 bit layout of `bitsieve240`.

use crate::bitsieve240::{SET_BIT, UNSET_BIT};

pub const MODULUS: u64 = 240;

/// Get the bit representing the number at the given index in the range.
#[inline]
pub fn get(segment: &[u64], idx: u64) -> bool {
    let bit = SET_BIT[(idx % MODULUS) as usize];
    if bit == 0 {
        false
    } else {
        segment[(idx / MODULUS) as usize] & bit != 0
    }
}

/// Set the bit representing the number at the given index in the range to off.
#[inline]
pub fn set_off(segment: &mut [u64], idx: u64) {
    let word = (idx / MODULUS) as usize;
    segment[word] &= UNSET_BIT[(idx % MODULUS) as usize];
}

/// Set the bit representing the number at the given index in the range to on.
#[inline]
pub fn set_on(segment: &mut [u64], idx: u64) {
    let word = (idx / MODULUS) as usize;
    segment[word] |= SET_BIT[(idx % MODULUS) as usize];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_small_values() {
        for ix in 0..MODULUS {
            let mut segment = [!0; 1];
            set_off(&mut segment, ix);
            assert_eq!(get(&segment, ix), false);
            set_on(&mut segment, ix);
            let expected = !(ix % 2 == 0 || ix % 3 == 0 || ix % 5 == 0);
            assert_eq!(get(&segment, ix), expected);
        }
    }

    #[test]
    fn set_large_values() {
        for ix in 0..MODULUS {
            let mut segment = [!0; 100];
            set_off(&mut segment, ix + 99 * 30);
            assert_eq!(get(&segment, ix + 99 * 30), false);
            set_on(&mut segment, ix + 99 * 30);
            let expected = !(ix % 2 == 0 || ix % 3 == 0 || ix % 5 == 0);
            assert_eq!(get(&segment, ix + 99 * 30), expected);
        }
    }
}
