//! φ(x,a) machinery (component C8): the partial sieve function, counting
//! integers `<= x` not divisible by any of the first `a` primes.
//!
//! `phi_tiny` (closed form for `a <= 6`) is ported from
//! `original_source/src/PhiTiny.hpp`. The original supports `a` up to 8;
//! this crate caps the tiny table at `a = 6` (`pp_6 = 30030`) to keep the
//! generated mod-tables a few tens of kilobytes rather than several
//! megabytes — documented as a deliberate simplification in DESIGN.md. Above
//! that, `PhiCache` recurses per `original_source/src/PhiCache.hpp`'s
//! documented interface, simplified to thread the +/- sign only at the
//! public entry point rather than through every recursive frame (the two
//! are mathematically identical, since negation is linear).

use crate::pitable::PiTable;
use std::collections::HashMap;

const PRIMES_TINY: [u64; 6] = [2, 3, 5, 7, 11, 13];
const MAX_TINY_A: usize = 6;

const PP: [u64; 7] = [1, 2, 6, 30, 210, 2310, 30030];
const TOTIENTS: [u64; 7] = [1, 1, 2, 8, 48, 480, 5760];

const fn build_mod_table<const N: usize>(a: usize) -> [u32; N] {
    let mut table = [0u32; N];
    let mut count = 0u32;
    let mut r = 0usize;
    while r < N {
        let mut coprime = true;
        let mut i = 0;
        while i < a {
            if (r as u64) % PRIMES_TINY[i] == 0 {
                coprime = false;
                break;
            }
            i += 1;
        }
        if coprime {
            count += 1;
        }
        table[r] = count;
        r += 1;
    }
    table
}

static MOD1: [u32; 2] = build_mod_table::<2>(1);
static MOD2: [u32; 6] = build_mod_table::<6>(2);
static MOD3: [u32; 30] = build_mod_table::<30>(3);
static MOD4: [u32; 210] = build_mod_table::<210>(4);
static MOD5: [u32; 2310] = build_mod_table::<2310>(5);
static MOD6: [u32; 30030] = build_mod_table::<30030>(6);

/// φ(x, a) in O(1), for `a <= 6`; for `a > 6` this still returns a value but
/// it is no longer O(1) — callers should route through [`PhiCache::phi`].
pub fn phi_tiny(x: u64, a: usize) -> u64 {
    if a == 0 {
        return x;
    }
    let a = a.min(MAX_TINY_A);
    let pp = PP[a];
    let tot = TOTIENTS[a];
    let r = (x % pp) as usize;
    let rem = match a {
        1 => MOD1[r],
        2 => MOD2[r],
        3 => MOD3[r],
        4 => MOD4[r],
        5 => MOD5[r],
        6 => MOD6[r],
        _ => unreachable!(),
    };
    (x / pp) * tot + rem as u64
}

pub fn is_phi_tiny(a: usize) -> bool {
    a <= MAX_TINY_A
}

pub fn max_tiny_a() -> usize {
    MAX_TINY_A
}

/// Number of primes `<= y` among the tiny primes, capped at [`max_tiny_a`].
pub fn get_c(y: u64) -> usize {
    let mut c = 0;
    for &p in PRIMES_TINY.iter() {
        if p <= y {
            c += 1;
        } else {
            break;
        }
    }
    c
}

/// `k = get_c(x^(1/4))`, used by the Gourdon orchestrator.
pub fn get_k(x: u64) -> usize {
    get_c(crate::util::ifourthroot(x))
}

/// Per-thread recursive φ(x,a) evaluator with a private memo cache.
/// `primes[i]` must be the `(i+1)`-th prime (1-indexed primes, 0-indexed
/// array), e.g. `primes[0] == 2`.
pub struct PhiCache<'a> {
    primes: &'a [u64],
    pi: &'a PiTable,
    cache: HashMap<(usize, u64), i64>,
    cache_cap: usize,
}

impl<'a> PhiCache<'a> {
    pub fn new(primes: &'a [u64], pi: &'a PiTable) -> PhiCache<'a> {
        let cap = (((pi.max_x() as f64).powf(1.0 / 2.5)) as usize).min(65_535);
        PhiCache {
            primes,
            pi,
            cache: HashMap::new(),
            cache_cap: cap,
        }
    }

    /// φ(x, a), the count of integers in `[1, x]` coprime to the first `a`
    /// primes.
    pub fn phi(&mut self, x: u64, a: usize) -> i64 {
        self.phi_unsigned(x, a)
    }

    /// φ(x, a) · sign — the form the D/A+C engines accumulate with.
    pub fn phi_signed(&mut self, x: u64, a: usize, sign: i64) -> i64 {
        sign * self.phi_unsigned(x, a)
    }

    fn phi_unsigned(&mut self, x: u64, a: usize) -> i64 {
        if a == 0 {
            return x as i64;
        }
        if is_phi_tiny(a) {
            return phi_tiny(x, a) as i64;
        }
        if x <= self.primes[a - 1] {
            return 1;
        }
        if a < self.primes.len() && x < self.primes[a] * self.primes[a] {
            return self.pi.pi(x) as i64 - a as i64 + 1;
        }
        if let Some(&v) = self.cache.get(&(a, x)) {
            return v;
        }

        let c = get_c(crate::util::isqrt(x)).min(a);
        let mut sum = phi_tiny(x, c) as i64;
        for b in c..a {
            let p = self.primes[b];
            sum -= self.phi_unsigned(x / p, b);
        }

        if self.cache.len() < self.cache_cap {
            self.cache.insert((a, x), sum);
        }
        sum
    }

    /// `phi[b] = φ(low - 1, b)` for `b` in `[0, a]`, per spec.md §4.7's
    /// phi-vector construction — the per-segment starting point for the
    /// D/S2_hard and A+C engines.
    pub fn phi_vector(&mut self, low: u64, a: usize) -> Vec<i64> {
        let x = low.saturating_sub(1);
        let c = get_c(crate::util::isqrt(x)).min(a);
        let mut phi = vec![0i64; a + 1];
        for (b, slot) in phi.iter_mut().enumerate().take(c + 1) {
            *slot = phi_tiny(x, b) as i64;
        }
        for b in (c + 1)..=a {
            let p = self.primes[b - 1];
            let term = self.phi_unsigned(x / p, b - 1);
            phi[b] = phi[b - 1] - term;
        }
        phi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primesieve::Sieve;

    #[test]
    fn phi_tiny_matches_brute_force() {
        for a in 0..=6usize {
            for x in 0..200u64 {
                let expected = (1..=x)
                    .filter(|&n| PRIMES_TINY[..a].iter().all(|&p| n % p != 0))
                    .count() as u64;
                assert_eq!(phi_tiny(x, a), expected, "x={x} a={a}");
            }
        }
    }

    #[test]
    fn phi_matches_brute_force_for_small_a() {
        let limit = 10_000;
        let sieve = Sieve::to_limit(limit);
        let primes: Vec<u64> = sieve.iter().take_while(|&p| p <= limit).collect();
        let pi = PiTable::new(limit);
        let mut cache = PhiCache::new(&primes, &pi);

        for a in 0..=10usize {
            for x in [50u64, 100, 500, 1000] {
                let expected = (1..=x)
                    .filter(|&n| primes[..a].iter().all(|&p| n % p != 0))
                    .count() as i64;
                assert_eq!(cache.phi(x, a), expected, "x={x} a={a}");
            }
        }
    }

    #[test]
    fn phi_vector_matches_direct_calls() {
        let limit = 10_000;
        let sieve = Sieve::to_limit(limit);
        let primes: Vec<u64> = sieve.iter().take_while(|&p| p <= limit).collect();
        let pi = PiTable::new(limit);
        let mut cache = PhiCache::new(&primes, &pi);

        let low = 200u64;
        let a = 8usize;
        let vector = cache.phi_vector(low, a);
        for b in 0..=a {
            assert_eq!(vector[b], cache.phi(low - 1, b), "b={b}");
        }
    }
}
