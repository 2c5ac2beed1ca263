//! Auxiliary summations (component C12, spec.md §4.10): one-pass sums over
//! primes and Möbius values that the D/S2 and A+C engines need besides
//! [`crate::p2::p2`] (P2 already lives in its own module since it is also a
//! standalone cross-check algorithm per spec.md §8).
//!
//! `s1`/`s2_trivial` are ported from the textual definitions in spec.md
//! §4.10; `p3`/`b_sum` generalise [`crate::p2::p2`]'s binary-search-free
//! `PiTable` identity to three-prime and Gourdon's y-bounded leaves
//! respectively, the same closed-form-over-`PiTable` approach already used
//! throughout this crate instead of a segmented sieve pass. `phi0` is the
//! tiny-phi base case promoted to Gourdon's own name for it. Gourdon's
//! seven Σ closed-form summations are *not* implemented as separate
//! functions — see `gourdon.rs`'s module docs and DESIGN.md for why.

use crate::factortable::{self, FactorTable};
use crate::phi::phi_tiny;
use crate::pitable::PiTable;
use crate::util::{icbrt, isqrt};

/// S1, the ordinary-leaves term: `sum mu(m) * phi_tiny(x/m, c)` over
/// square-free `m <= y` whose smallest prime factor exceeds `prime[c]`
/// (spec.md's "lpf(m) > prime_c"). spec.md §4.10's prose also divides by
/// `prime_c` inside the `phi` argument; this crate follows the textbook
/// Lagarias-Miller-Odlyzko identity (`phi(x/m, c)`, no extra division) since
/// that is the formula `phi_tiny(x,c) + S1 + S2 == phi(x,a)` requires —
/// resolved as an Open Question in DESIGN.md.
pub fn s1(x: u64, y: u64, c: usize, primes: &[u64], factors: &FactorTable) -> i64 {
    let prime_c = if c == 0 { 0 } else { primes[c - 1] };
    let mut sum = 0i64;
    let hi = factortable::to_index(y);
    for idx in 0..=hi {
        let m = factortable::get_number(idx);
        if m > y {
            break;
        }
        let spf = factors.is_leaf(idx);
        if spf == 0 || (spf as u64) <= prime_c {
            continue;
        }
        let mu = factors.mu(idx);
        let term = x / m;
        sum += mu as i64 * phi_tiny(term, c) as i64;
    }
    sum
}

/// S2_trivial: the count of `(b, l)` index pairs, `c <= l <= b < a`, with
/// `prime[b] * prime[l] > y` — leaves whose `phi` value is trivially 1
/// because `x / (prime[b] * prime[l])` already falls below the next prime.
pub fn s2_trivial(y: u64, a: usize, c: usize, primes: &[u64]) -> i64 {
    let mut count = 0i64;
    for b in c..a {
        let pb = primes[b];
        for l in c..=b {
            let pl = primes[l];
            if pb.saturating_mul(pl) > y {
                count += 1;
            }
        }
    }
    count
}

/// P3(x, a): count of integers `<= x` that are products of exactly three
/// primes, all `> prime_a`, via the same `PiTable` closed identity
/// [`crate::p2::p2`] uses for the two-prime case.
pub fn p3(x: u64, a: usize, primes: &[u64], pi: &PiTable) -> i64 {
    let mut sum = 0i64;
    let cbrt_x = icbrt(x);
    for (idx_b, &pb) in primes.iter().enumerate() {
        let b = idx_b + 1;
        if b <= a {
            continue;
        }
        if pb > cbrt_x {
            break;
        }
        let xb = x / pb;
        let sqrt_xb = isqrt(xb);
        for (idx_l, &pl) in primes.iter().enumerate().skip(idx_b) {
            let l = idx_l + 1;
            if pl > sqrt_xb {
                break;
            }
            let xbl = xb / pl;
            if xbl < pl {
                break;
            }
            sum += pi.pi(xbl) as i64 - l as i64 + 1;
        }
    }
    sum
}

/// B(x, y) (Gourdon): leaves with one prime factor in `(sqrt(y), y]`,
/// summed via the same `PiTable` identity as [`crate::p2::p2`] but bounded
/// by `y` rather than `sqrt(x)`.
pub fn b_sum(x: u64, y: u64, primes: &[u64], pi: &PiTable) -> i64 {
    let mut sum = 0i64;
    let sqrt_y = isqrt(y);
    for (idx, &p) in primes.iter().enumerate() {
        let b = idx + 1;
        if p <= sqrt_y {
            continue;
        }
        if p > y {
            break;
        }
        let xp = x / p;
        if xp < p {
            break;
        }
        sum += pi.pi(xp) as i64 - b as i64 + 1;
    }
    sum
}

/// Phi0: the short partial-phi base case, `phi_tiny(x, c)`.
pub fn phi0(x: u64, c: usize) -> i64 {
    phi_tiny(x, c) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primesieve::Sieve;

    #[test]
    fn s1_matches_brute_force() {
        let x = 5000u64;
        let y = 100u64;
        let limit = 200u64;
        let sieve = Sieve::to_limit(limit);
        let primes: Vec<u64> = sieve.iter().take_while(|&p| p <= limit).collect();
        let factors = FactorTable::new(y, y, &sieve);
        let c = 3usize; // primes[0..3] = 2,3,5

        let expected: i64 = (1..=y)
            .filter_map(|m| {
                let mut n = m;
                let mut mu = 1i32;
                let mut spf = None;
                let mut p = 2u64;
                while p * p <= n {
                    if n % p == 0 {
                        spf.get_or_insert(p);
                        n /= p;
                        if n % p == 0 {
                            return None;
                        }
                        mu = -mu;
                    }
                    p += 1;
                }
                if n > 1 {
                    spf.get_or_insert(n);
                    mu = -mu;
                }
                let spf = spf.unwrap_or(u64::MAX);
                if spf <= primes[c - 1] {
                    return None;
                }
                Some(mu as i64 * phi_tiny(x / m, c) as i64)
            })
            .sum();

        assert_eq!(s1(x, y, c, &primes, &factors), expected);
    }

    #[test]
    fn s2_trivial_counts_matching_pairs() {
        let limit = 200u64;
        let sieve = Sieve::to_limit(limit);
        let primes: Vec<u64> = sieve.iter().take_while(|&p| p <= limit).collect();
        let y = 50u64;
        let a = 10usize;
        let c = 3usize;

        let expected = (c..a)
            .flat_map(|b| (c..=b).map(move |l| (b, l)))
            .filter(|&(b, l)| primes[b] * primes[l] > y)
            .count() as i64;

        assert_eq!(s2_trivial(y, a, c, &primes), expected);
    }

    #[test]
    fn p3_matches_brute_force() {
        let limit = 2000u64;
        let sieve = Sieve::to_limit(limit);
        let primes: Vec<u64> = sieve.iter().take_while(|&p| p <= limit).collect();
        let pi = PiTable::new(limit);
        let a = 2usize; // primes > primes[1] = 3
        let threshold = primes[a - 1];

        let expected: i64 = (2..=limit)
            .filter(|&n| {
                let mut factors = Vec::new();
                let mut rem = n;
                let mut p = 2u64;
                while p * p <= rem {
                    while rem % p == 0 {
                        factors.push(p);
                        rem /= p;
                    }
                    p += 1;
                }
                if rem > 1 {
                    factors.push(rem);
                }
                factors.len() == 3 && factors.iter().all(|&f| f > threshold)
            })
            .count() as i64;

        assert_eq!(p3(limit, a, &primes, &pi), expected);
    }

    #[test]
    fn b_sum_matches_brute_force() {
        let limit = 2000u64;
        let sieve = Sieve::to_limit(limit);
        let primes: Vec<u64> = sieve.iter().take_while(|&p| p <= limit).collect();
        let pi = PiTable::new(limit);
        let y = 100u64;
        let sqrt_y = isqrt(y);

        let expected: i64 = (2..=limit)
            .filter(|&n| {
                let mut p = 2u64;
                while p * p <= n {
                    if n % p == 0 {
                        let q = n / p;
                        return sieve.is_prime(q) && p > sqrt_y && p <= y;
                    }
                    p += 1;
                }
                false
            })
            .count() as i64;

        assert_eq!(b_sum(limit, y, &primes, &pi), expected);
    }
}
