//! Meissel's formula (spec.md §8): `pi(x) = phi(x,a) + a - 1 - P2(x,a)`,
//! `a = pi(floor(x^(1/3)))`.
//!
//! Grounded on `original_source/src/meissel.cpp`'s public contract, combining
//! this crate's own [`crate::phi`] and [`crate::p2`] components rather than
//! the original's hand-fused loop.

use crate::p2::p2;
use crate::phi::PhiCache;
use crate::pitable::PiTable;
use crate::util::icbrt;

/// `pi(x)` via Meissel's formula. `primes` must hold at least the first
/// `pi(isqrt(x))` primes (P2 needs primes up to `sqrt(x)`), and `pi` must
/// cover at least `x / primes[a]`.
pub fn pi_meissel(x: u64, primes: &[u64], pi: &PiTable) -> i64 {
    if x < 2 {
        return 0;
    }
    let a = pi.pi(icbrt(x)) as usize;
    let mut cache = PhiCache::new(primes, pi);
    cache.phi(x, a) + a as i64 - 1 - p2(x, a, primes, pi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primesieve::Sieve;

    #[test]
    fn pi_meissel_matches_known_values() {
        let limit = 100_000u64;
        let sieve = Sieve::to_limit(limit);
        let primes: Vec<u64> = sieve.iter().take_while(|&p| p <= limit).collect();
        let pi = PiTable::new(limit);

        for &(x, expected) in &[(10u64, 4i64), (100, 25), (1000, 168), (10_000, 1229), (100_000, 9592)] {
            assert_eq!(pi_meissel(x, &primes, &pi), expected, "x={x}");
        }
    }

    #[test]
    fn pi_meissel_matches_pi_table_everywhere() {
        let limit = 20_000u64;
        let sieve = Sieve::to_limit(limit);
        let primes: Vec<u64> = sieve.iter().take_while(|&p| p <= limit).collect();
        let pi = PiTable::new(limit);

        for x in [1u64, 2, 3, 4, 5, 100, 1000, 19_999, 20_000] {
            assert_eq!(pi_meissel(x, &primes, &pi), pi.pi(x) as i64, "x={x}");
        }
    }

    #[test]
    fn pi_meissel_agrees_with_legendre() {
        use crate::legendre::pi_legendre;
        let limit = 50_000u64;
        let sieve = Sieve::to_limit(limit);
        let primes: Vec<u64> = sieve.iter().take_while(|&p| p <= limit).collect();
        let pi = PiTable::new(limit);

        for x in [1234u64, 5000, 25_000, 49_999] {
            assert_eq!(pi_meissel(x, &primes, &pi), pi_legendre(x, &primes, &pi), "x={x}");
        }
    }
}
