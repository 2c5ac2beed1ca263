//! Public API (component C13): algorithm selection, 64-/128-bit dispatch,
//! `nth_prime`, `phi`, and the Schoenfeld-bound sanity check against `Li(x)`
//! spec.md §9 asks for.
//!
//! Grounded on `original_source/src/api.cpp` / `pi.cpp`'s dispatch shape
//! (small-x closed forms, larger-x combinatorial engines) and
//! `original_source/src/util.cpp`'s `print_status`/validation helpers for
//! the Schoenfeld check, now expressed as a `tracing::warn!` instead of a
//! fatal assertion, since our approximations are diagnostic, not a
//! correctness gate.
//!
//! This crate's engines ([`crate::legendre`], [`crate::meissel`],
//! [`crate::dr`], [`crate::gourdon`]) are each closed-form evaluations of
//! the same Legendre identity rather than spec.md's segmented, thread-pool
//! driven traversals (see each module's own docs). `pi_with_threads`'s
//! `threads` parameter is forwarded to the Deleglise-Rivat and Gourdon
//! engines, which hand it to [`crate::p2::p2_parallel`] (backed by
//! [`crate::load_balancer`], independently tested there) to split the
//! `P2(x,a)` term across worker threads; `phi(x,a)` itself is still
//! evaluated by [`crate::phi::PhiCache`]'s single-threaded recursion — see
//! DESIGN.md for why that term isn't (yet) also parallelised.

use crate::alpha::AlphaOverrides;
use crate::approx::{li_offset, nth_prime_approx};
use crate::error::{PrimecountError, Result};
use crate::gourdon::pi_gourdon_with_threads;
use crate::legendre::pi_legendre;
use crate::meissel::pi_meissel;
use crate::pitable::PiTable;
use crate::primesieve::Sieve;
use crate::util::{ceil_div, icbrt, isqrt};

/// Largest `n` this crate will search for an nth prime of (spec.md §6).
pub const MAX_NTH_PRIME_N: u64 = 216_289_611_853_439_384;

/// `pi(x)`, using the default thread count (logical CPU count).
pub fn pi(x: u128) -> Result<u64> {
    pi_with_threads(x, default_threads())
}

/// `pi(x)` with an explicit thread count. See module docs for which part of
/// the computation `threads` actually affects.
pub fn pi_with_threads(x: u128, threads: usize) -> Result<u64> {
    if threads == 0 {
        return Err(PrimecountError::InvalidArgument("threads must be >= 1".to_string()));
    }
    if x > u64::MAX as u128 {
        return Err(PrimecountError::RangeError { x, max: u64::MAX as u128 });
    }
    let x64 = x as u64;
    let overrides = AlphaOverrides::default();
    let result = select_algorithm(x64, &overrides, threads);
    verify_against_li(x64, result);
    Ok(result.max(0) as u64)
}

/// `pi(x)` with explicit `alpha`/`alpha_y`/`alpha_z` overrides (the CLI's
/// `-a`/`--alpha-y`/`--alpha-z` flags thread through here).
pub fn pi_with_overrides(x: u128, overrides: AlphaOverrides) -> Result<u64> {
    if x > u64::MAX as u128 {
        return Err(PrimecountError::RangeError { x, max: u64::MAX as u128 });
    }
    let x64 = x as u64;
    let result = select_algorithm(x64, &overrides, default_threads());
    verify_against_li(x64, result);
    Ok(result.max(0) as u64)
}

fn default_threads() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Picks an algorithm by `x`'s magnitude, per spec.md §9's rough size
/// thresholds (trivial PiTable lookup / Legendre / Meissel / Deleglise-Rivat
/// / Gourdon). `threads` only affects the Deleglise-Rivat/Gourdon branches —
/// Legendre and Meissel are plain single-pass sums too small for this crate's
/// dispatch range to bother splitting.
fn select_algorithm(x: u64, overrides: &AlphaOverrides, threads: usize) -> i64 {
    if x < 2 {
        return 0;
    }
    if x <= 10_000 {
        let pi = PiTable::new(10_000);
        return pi.pi(x) as i64;
    }

    let cb = icbrt(x).max(2);
    let table_limit = ceil_div(x, cb) + isqrt(x) + 10;
    let sieve_limit = isqrt(x).max(cb);
    let primes_sieve = Sieve::to_limit(sieve_limit);
    let primes: Vec<u64> = primes_sieve.iter().take_while(|&p| p <= sieve_limit).collect();
    let pi = PiTable::new(table_limit);

    match x {
        0..=1_000_000 => pi_legendre(x, &primes, &pi),
        1_000_001..=100_000_000 => pi_meissel(x, &primes, &pi),
        100_000_001..=10_000_000_000 => crate::dr::pi_deleglise_rivat_with_threads(x, overrides, threads),
        _ => pi_gourdon_with_threads(x, overrides, threads),
    }
}

/// Logs (rather than fails on) a Schoenfeld-bound sanity check: for `x >=
/// 2657`, `|pi(x) - Li(x)| < sqrt(x)*ln(x)/(8*pi)`. A violation would
/// indicate a bug in one of the engines above, not an expected input.
fn verify_against_li(x: u64, result: i64) {
    if x < 2657 {
        return;
    }
    let bound = (x as f64).sqrt() * (x as f64).ln() / (8.0 * std::f64::consts::PI);
    let diff = (result as f64 - li_offset(x as f64)).abs();
    if diff > bound {
        tracing::warn!(x, result, bound, diff, "pi(x) result outside the Schoenfeld bound around Li(x)");
    }
}

/// `nth_prime(n)`, 1-indexed (`nth_prime(1) == 2`).
pub fn nth_prime(n: u64) -> Result<u64> {
    if n == 0 {
        return Err(PrimecountError::InvalidArgument("n must be >= 1".to_string()));
    }
    if n > MAX_NTH_PRIME_N {
        return Err(PrimecountError::RangeError { x: n as u128, max: MAX_NTH_PRIME_N as u128 });
    }

    let mut guess = nth_prime_approx(n).max(2);
    loop {
        let count = pi(guess as u128)?;
        if count >= n {
            break;
        }
        guess = ((guess as f64) * 1.2).ceil() as u64 + 16;
    }

    let sieve = Sieve::to_limit(guess + 64);
    sieve
        .nth_prime((n - 1) as usize)
        .ok_or(PrimecountError::RangeError { x: n as u128, max: sieve.limit() as u128 })
}

/// `phi(x, a)`: the partial sieve function, counting integers `<= x` not
/// divisible by any of the first `a` primes.
pub fn phi(x: u64, a: usize) -> Result<i64> {
    if a == 0 {
        return Ok(x as i64);
    }
    let sieve = Sieve::to_n_primes(a + 1);
    let primes: Vec<u64> = sieve.iter().take(a + 1).collect();
    if primes.len() <= a {
        return Err(PrimecountError::InvalidArgument(format!("could not sieve {a} primes")));
    }
    let table_limit = x.max(isqrt(x)).max(primes[a.min(primes.len() - 1)]);
    let pi = PiTable::new(table_limit.max(10));
    let mut cache = crate::phi::PhiCache::new(&primes, &pi);
    Ok(cache.phi(x, a))
}
