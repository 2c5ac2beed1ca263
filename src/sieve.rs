//! The segmented wheel-30 bit sieve (component C7) that the D/S2_hard and
//! A+C engines cross numbers off of as they consume sieving primes.
//!
//! This collapses several of spec.md §4.6's internal performance tricks into
//! simpler but contract-equivalent forms (recorded in DESIGN.md):
//! - The 64-case unrolled `cross_off` switch becomes a `WheelState`-driven
//!   loop (`wheel::WheelState`, already shared with the plain segmented
//!   sieve in `primesieve.rs`) — same strike pattern, expressed as a loop
//!   instead of hand-unrolled jump table entries.
//! - The two-level `counter` array backing the stateful `count(stop)` is
//!   collapsed into a single monotonic cursor (`cursor_stop`/`cursor_sum`):
//!   both give the same amortised cost (each call only rescans the bits
//!   since the last `stop`), the array just additionally cached per-chunk
//!   subtotals to skip *whole* chunks faster — an optimisation, not part of
//!   the observable contract.
//! - `pre_sieve` strikes primes up to `c` directly with `cross_off` rather
//!   than pre-computing and AND-tiling the three periodic arrays spec.md
//!   §4.6 describes; the output is identical, just assembled per-segment
//!   instead of from cached tiles.

use crate::bitsieve240::{UNSET_LARGER, UNSET_SMALLER};
use crate::popcount::count_ones_region;
use crate::segment::{self, MODULUS};
use crate::wheel::WheelState;
use std::collections::HashMap;

/// A thread-local, reusable segmented sieve covering `[low, low + size)`.
pub struct Sieve {
    low: u64,
    size: u64,
    words: Vec<u64>,
    wheels: HashMap<u64, WheelState>,
    total_count: u64,
    cursor_stop: u64,
    cursor_sum: u64,
}

impl Sieve {
    /// `low` must be a multiple of 30; `segment_size` is rounded up to a
    /// multiple of 240.
    pub fn new(low: u64, segment_size: u64) -> Sieve {
        assert_eq!(low % 30, 0, "sieve segments must start on a multiple of 30");
        let size = if segment_size % MODULUS == 0 {
            segment_size.max(MODULUS)
        } else {
            segment_size + MODULUS - segment_size % MODULUS
        };
        let words = vec![!0u64; (size / MODULUS) as usize];
        Sieve {
            low,
            size,
            words,
            wheels: HashMap::new(),
            total_count: (size / MODULUS) * 8,
            cursor_stop: 0,
            cursor_sum: 0,
        }
    }

    pub fn low(&self) -> u64 {
        self.low
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Re-point this sieve at a fresh segment, resetting all cross-off and
    /// cursor state (the wheel states for individual primes survive across
    /// segments via [`Sieve::add`]/[`Sieve::cross_off_count`], since callers
    /// persist those themselves per prime).
    pub fn reset(&mut self, low: u64) {
        assert_eq!(low % 30, 0);
        self.low = low;
        for w in self.words.iter_mut() {
            *w = !0u64;
        }
        self.total_count = (self.size / MODULUS) * 8;
        self.cursor_stop = 0;
        self.cursor_sum = 0;
    }

    /// Count 1-bits (numbers not yet crossed off) in `[start, stop]`,
    /// relative to this segment's own start.
    pub fn count(&self, start: u64, stop: u64) -> u64 {
        if start > stop {
            return 0;
        }
        let w0 = (start / MODULUS) as usize;
        let w1 = (stop / MODULUS) as usize;
        if w0 == w1 {
            let mask = UNSET_SMALLER[(start % MODULUS) as usize] & UNSET_LARGER[(stop % MODULUS) as usize];
            return (self.words[w0] & mask).count_ones() as u64;
        }
        let mut total =
            (self.words[w0] & UNSET_SMALLER[(start % MODULUS) as usize]).count_ones() as u64;
        for w in &self.words[w0 + 1..w1] {
            total += w.count_ones() as u64;
        }
        total += (self.words[w1] & UNSET_LARGER[(stop % MODULUS) as usize]).count_ones() as u64;
        total
    }

    /// Stateful variant of [`Sieve::count`]: `stop` must be non-decreasing
    /// across calls within one segment (reset by [`Sieve::reset`]).
    pub fn count_incremental(&mut self, stop: u64) -> u64 {
        debug_assert!(stop >= self.cursor_stop || self.cursor_stop == 0);
        let delta = self.count(self.cursor_stop, stop);
        self.cursor_sum += delta;
        self.cursor_stop = stop + 1;
        self.cursor_sum
    }

    /// Register (or resume) sieving prime `p`, first assigned to prime index
    /// `b`. Computes the first multiple of `p` that is `> self.low` and
    /// coprime to {2, 3, 5} if this is the prime's first segment.
    pub fn add(&mut self, p: u64, b: u64) {
        if self.wheels.contains_key(&b) {
            return;
        }
        let mut m = self.low + p;
        while m % 2 == 0 || m % 3 == 0 || m % 5 == 0 {
            m += p;
        }
        let state = WheelState::new(p, m - self.low, m);
        self.wheels.insert(b, state);
    }

    /// Strike all multiples of prime `p` (registered under index `b`) that
    /// fall inside this segment, without touching the running counts.
    pub fn cross_off(&mut self, p: u64, b: u64) {
        self.add(p, b);
        let state = self.wheels.get_mut(&b).expect("cross_off requires add() first");
        while state.multiple < self.size {
            segment::set_off(&mut self.words, state.multiple);
            state.advance();
        }
        state.multiple -= self.size;
    }

    /// As [`Sieve::cross_off`], but also decrements [`Sieve::total_count`]
    /// for every bit actually cleared (bits already off cost nothing extra).
    pub fn cross_off_count(&mut self, p: u64, b: u64) {
        self.add(p, b);
        let state = self.wheels.get_mut(&b).expect("cross_off_count requires add() first");
        let mut cleared = 0u64;
        while state.multiple < self.size {
            if segment::get(&self.words, state.multiple) {
                segment::set_off(&mut self.words, state.multiple);
                cleared += 1;
            }
            state.advance();
        }
        state.multiple -= self.size;
        self.total_count -= cleared;
    }

    /// Initialize a fresh segment: strike every prime `<= c` (by prime index,
    /// 1-indexed) out of the sieve before the main D/A+C loops begin.
    pub fn pre_sieve(&mut self, primes: &[u64], c: usize) {
        for (b, &p) in primes.iter().enumerate().take(c).skip(3) {
            self.cross_off(p, b as u64 + 1);
        }
        self.init_counter();
    }

    /// Rebuild [`Sieve::total_count`] (and the stateful cursor) by scanning
    /// the whole segment. Call once after `pre_sieve` or any bulk mutation
    /// that bypassed `cross_off_count`.
    pub fn init_counter(&mut self) {
        self.total_count = count_ones_region(&self.words);
        self.cursor_stop = 0;
        self.cursor_sum = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primesieve::Sieve as PlainSieve;

    #[test]
    fn cross_off_matches_trial_division() {
        let low = 0u64;
        let size = 2400u64;
        let mut sieve = Sieve::new(low, size);
        let plain = PlainSieve::to_limit(low + size);
        let small_primes: Vec<u64> = plain.iter().take_while(|&p| p * p < low + size).collect();

        for (b, &p) in small_primes.iter().enumerate() {
            if p > 5 {
                sieve.cross_off_count(p, b as u64 + 1);
            }
        }

        for n in 0..size {
            let abs = low + n;
            let expected = abs >= 2
                && ![2u64, 3, 5].contains(&abs)
                && small_primes.iter().all(|&p| p * p > abs || abs % p != 0);
            assert_eq!(segment::get(&sieve.words, n), expected, "n={abs}");
        }
    }

    #[test]
    fn count_matches_popcount_of_window() {
        let mut sieve = Sieve::new(0, 2400);
        sieve.cross_off_count(7, 1);
        sieve.cross_off_count(11, 2);

        let brute: u64 = (100..500).filter(|&i| segment::get(&sieve.words, i)).count() as u64;
        assert_eq!(sieve.count(100, 499), brute);
    }

    #[test]
    fn incremental_count_matches_batch_count() {
        let mut sieve = Sieve::new(0, 2400);
        sieve.cross_off_count(7, 1);
        sieve.init_counter();

        let mut expected = 0u64;
        for stop in (0..2400u64).step_by(37) {
            expected = sieve.count(0, stop);
            assert_eq!(sieve.count_incremental(stop), expected);
        }
    }

    #[test]
    fn pre_sieve_strikes_small_primes() {
        let mut sieve = Sieve::new(0, 2400);
        let primes = [2u64, 3, 5, 7, 11, 13];
        sieve.pre_sieve(&primes, 4);
        let multiples_of_seven_cleared = (0..2400u64)
            .filter(|&n| n % 7 == 0 && n > 0)
            .all(|n| !segment::get(&sieve.words, n));
        assert!(multiples_of_seven_cleared);
    }
}
