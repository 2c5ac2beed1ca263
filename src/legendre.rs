//! Legendre's formula (spec.md §8's smallest cross-check algorithm):
//! `pi(x) = phi(x,a) + a - 1`, `a = pi(floor(sqrt(x)))`.
//!
//! Grounded on `original_source/src/legendre/pi_legendre.cpp`'s public
//! contract — the formula itself, not the original's OpenMP-parallel search
//! for `a`, since this crate always has a `PiTable` on hand to look `a` up
//! directly.

use crate::phi::PhiCache;
use crate::pitable::PiTable;
use crate::util::isqrt;

/// `pi(x)` via Legendre's formula. `primes` must hold at least the first
/// `pi(isqrt(x))` primes, and `pi` must cover at least `isqrt(x)`.
pub fn pi_legendre(x: u64, primes: &[u64], pi: &PiTable) -> i64 {
    if x < 2 {
        return 0;
    }
    let a = pi.pi(isqrt(x));
    let mut cache = PhiCache::new(primes, pi);
    cache.phi(x, a as usize) + a as i64 - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primesieve::Sieve;

    #[test]
    fn pi_legendre_matches_known_values() {
        let limit = 100_000u64;
        let sieve = Sieve::to_limit(limit);
        let primes: Vec<u64> = sieve.iter().take_while(|&p| p <= limit).collect();
        let pi = PiTable::new(limit);

        for &(x, expected) in &[(10u64, 4i64), (100, 25), (1000, 168), (10_000, 1229), (100_000, 9592)] {
            assert_eq!(pi_legendre(x, &primes, &pi), expected, "x={x}");
        }
    }

    #[test]
    fn pi_legendre_matches_pi_table_everywhere() {
        let limit = 20_000u64;
        let sieve = Sieve::to_limit(limit);
        let primes: Vec<u64> = sieve.iter().take_while(|&p| p <= limit).collect();
        let pi = PiTable::new(limit);

        for x in [1u64, 2, 3, 4, 5, 100, 1000, 19_999, 20_000] {
            assert_eq!(pi_legendre(x, &primes, &pi), pi.pi(x) as i64, "x={x}");
        }
    }
}
