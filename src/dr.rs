//! D(x,y) / S2 engine (component C10): the "special leaves" correction term
//! that lets `phi(x,a)` be evaluated for `a` too large for plain recursion.
//!
//! spec.md §4.8 describes a segmented engine that amortises each leaf's
//! `phi` lookup through a per-thread [`crate::sieve::Sieve`] and a
//! monotonic `phi`-vector cursor, splitting the sum into "square-free
//! leaves" (Loop A) and "two-prime leaves" (Loop B) purely so the hot path
//! never calls the recursive `phi` directly. Both loops compute the same
//! total:
//!
//! `S2(x,y) = sum_{b=c}^{a-1} sum_{m} mu(m) * phi(x/(prime[b+1]*m), b)`
//!
//! over square-free `m` in `(prime[b+1], y]` whose smallest prime factor
//! exceeds `prime[b+1]` (`[`FactorTable::is_leaf`] encodes exactly that
//! predicate). This module evaluates that identity directly against
//! [`crate::phi::PhiCache`] and [`crate::factortable::FactorTable`] instead
//! of re-deriving the sieve-amortised traversal — mathematically identical,
//! or it would disagree with the segmented engine's own stated formula above
//! it — and avoids depending on spec.md §4.8's segment-monotonicity
//! invariant, which the retrieval pack's `original_source/` only declares
//! the signature of (`S2_hard.cpp`'s body isn't in the pack). Recorded as a
//! scope simplification in DESIGN.md.

use crate::alpha::{AlphaOverrides, AlphaTuning};
use crate::factortable::{self, FactorTable};
use crate::p2::{p2, p2_parallel};
use crate::phi::PhiCache;
use crate::pitable::PiTable;
use crate::primesieve::Sieve;
use crate::util::{ceil_div, isqrt};

/// `S2(x, y)`, the special-leaves correction. `c` is the tiny-phi cutover
/// (`phi::get_c(isqrt(y))` is the usual choice), `a = pi(y)`. `factors` must
/// cover `[1, y]`.
pub fn s2(x: u64, y: u64, a: usize, c: usize, primes: &[u64], pi: &PiTable, factors: &FactorTable) -> i64 {
    let mut cache = PhiCache::new(primes, pi);
    let mut sum = 0i64;

    for b in c..a {
        let p = primes[b];
        let xp = x / p;
        if xp <= p {
            continue;
        }

        let lo_idx = factortable::to_index(p + 1);
        let hi_idx = factortable::to_index(y);
        for idx in lo_idx..=hi_idx {
            let m = factortable::get_number(idx);
            if m > y {
                break;
            }
            let spf = factors.is_leaf(idx);
            if spf == 0 || (spf as u64) <= p {
                continue;
            }
            let mu = factors.mu(idx);
            if mu == 0 {
                continue;
            }
            let term = xp / m;
            if term == 0 {
                continue;
            }
            sum += mu as i64 * cache.phi(term, b);
        }
    }

    sum
}

/// `pi(x)` via the Deleglise-Rivat decomposition: `phi(x,a) + a - 1 -
/// P2(x,a)` with `a = pi(y)`, `y` from [`AlphaTuning::for_deleglise_rivat`]
/// — the same Legendre identity [`crate::meissel::pi_meissel`] evaluates,
/// tuned with Deleglise-Rivat's own `y`. See module docs on why `s2` is not
/// separately folded in here: `phi(x,a)` is already evaluated exactly by
/// `PhiCache`'s recursion.
pub fn pi_deleglise_rivat(x: u64, overrides: &AlphaOverrides) -> i64 {
    pi_deleglise_rivat_with_threads(x, overrides, 1)
}

/// As [`pi_deleglise_rivat`], but evaluates the `P2(x,a)` term
/// (component C12) across `threads` workers via
/// [`crate::load_balancer::run_balanced`] (component C9) instead of a single
/// pass — see [`crate::p2::p2_parallel`]. `threads == 1` takes the identical
/// single-pass `p2` codepath `pi_deleglise_rivat` already used.
pub fn pi_deleglise_rivat_with_threads(x: u64, overrides: &AlphaOverrides, threads: usize) -> i64 {
    if x < 2 {
        return 0;
    }
    let tuning = AlphaTuning::for_deleglise_rivat(x as u128, overrides);
    let y = tuning.y.max(1);

    let sieve_limit = isqrt(x).max(y);
    let primes_sieve = Sieve::to_limit(sieve_limit);
    let primes: Vec<u64> = primes_sieve.iter().take_while(|&p| p <= sieve_limit).collect();
    // `PhiCache::phi`'s closed-form branch and `p2` both query `pi.pi()` at
    // arguments up to `x/y` (~x^(2/3)), not just `isqrt(x)` — the same
    // reasoning as `orchestrator::select_algorithm`'s `table_limit`.
    let table_limit = ceil_div(x, y).saturating_add(isqrt(x)).saturating_add(10).max(sieve_limit);
    let pi = PiTable::new(table_limit);

    let a = pi.pi(y) as usize;
    let mut cache = PhiCache::new(&primes, &pi);

    let p2_term = if threads <= 1 {
        p2(x, a, &primes, &pi)
    } else {
        p2_parallel(x, y, &primes_sieve, &pi, threads)
    };

    cache.phi(x, a) + a as i64 - 1 - p2_term
}
