//! `PiTable` (component C4): an in-memory, compressed π(x) lookup table.
//!
//! Ported from `original_source/include/PiTable.hpp`: one `(count, bits)`
//! pair per 240-integer block, `count` being the number of primes strictly
//! below the block and `bits` the wheel-30 bitmap of primes inside it.
//! `π(x)` is then `count + popcount(bits & unset_larger[x % 240])`.

use crate::bitsieve240::{PI_TINY, UNSET_LARGER};
use crate::primesieve::Sieve;

const MODULUS: u64 = 240;

#[derive(Clone, Copy, Default)]
struct PiEntry {
    count: u64,
    bits: u64,
}

/// Compressed π(x) lookup table covering `[0, max_x]`.
pub struct PiTable {
    entries: Vec<PiEntry>,
    max_x: u64,
}

impl PiTable {
    /// Build a table answering π(x) for all `x <= max_x`.
    ///
    /// Construction sieves primes up to `max_x` with the plain segmented
    /// sieve (C3), then prefix-sums per-block popcounts. The original's
    /// parallel variant of this pass buys wall-clock on huge tables; the
    /// prefix sum is kept serial here since it's already linear in the
    /// number of 240-blocks, not the bottleneck construction step.
    pub fn new(max_x: u64) -> PiTable {
        let sieve = Sieve::to_limit(max_x);
        let num_blocks = (max_x / MODULUS) as usize + 1;
        let mut entries = vec![PiEntry::default(); num_blocks];

        // Fill the wheel-30 bitmap: reuse the small `Sieve`'s own encoding,
        // which already stores exactly this bitmap for primes > 5.
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.bits = sieve.word(i);
        }

        // Running count of primes < block_i * 240, including 2, 3 and 5.
        let mut running = 3u64;
        for entry in entries.iter_mut() {
            entry.count = running;
            running += entry.bits.count_ones() as u64;
        }

        PiTable { entries, max_x }
    }

    pub fn max_x(&self) -> u64 {
        self.max_x
    }

    /// Number of primes <= x. Panics if `x > max_x()`.
    #[inline]
    pub fn pi(&self, x: u64) -> u64 {
        assert!(x <= self.max_x);
        if (x as usize) < PI_TINY.len() {
            return PI_TINY[x as usize];
        }
        let entry = &self.entries[(x / MODULUS) as usize];
        entry.count + (entry.bits & UNSET_LARGER[(x % MODULUS) as usize]).count_ones() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_concrete_scenarios() {
        let table = PiTable::new(1_000_000);
        assert_eq!(table.pi(10), 4);
        assert_eq!(table.pi(100), 25);
        assert_eq!(table.pi(1_000_000), 78_498);
    }

    #[test]
    fn pi_tiny_cases() {
        let table = PiTable::new(1000);
        assert_eq!(table.pi(0), 0);
        assert_eq!(table.pi(1), 0);
        assert_eq!(table.pi(2), 1);
        assert_eq!(table.pi(3), 2);
        assert_eq!(table.pi(4), 2);
        assert_eq!(table.pi(5), 3);
    }

    #[test]
    fn pi_is_monotonic_and_matches_is_prime() {
        let limit = 20_000;
        let sieve = Sieve::to_limit(limit);
        let table = PiTable::new(limit);
        let mut running = 0u64;
        for n in 0..=limit {
            if sieve.is_prime(n) {
                running += 1;
            }
            assert_eq!(table.pi(n), running, "pi({n})");
        }
    }
}
