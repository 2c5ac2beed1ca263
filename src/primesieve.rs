//! A plain segmented sieve of Eratosthenes (component C3, "Prime iterator").
//!
//! `spec.md` treats this as an external collaborator with a stated contract
//! — yield primes ascending/descending within `[lo, hi]` — and notes "a
//! standard segmented sieve of Eratosthenes suffices". This module is that
//! standard implementation, adapted from the original `feadoor-primesieve`
//! crate's `segsieve`/`iterator` modules to the wheel-30 tables in
//! `bitsieve240`.

use crate::bitsieve240::OFFSETS;
use crate::segment::{set_off, MODULUS};
use crate::wheel::Wheel30;
use std::cmp::min;

const SEGMENT_LEN: usize = 32768;
const SEGMENT_SIZE: u64 = MODULUS * SEGMENT_LEN as u64;

/// Iterates over the numbers encoded by a sequence of wheel-30 `u64` words.
pub struct BitsIterator<'a> {
    current: u64,
    base: u64,
    curr_idx: usize,
    words: &'a [u64],
}

impl<'a> BitsIterator<'a> {
    pub fn new(words: &'a [u64]) -> BitsIterator<'a> {
        BitsIterator {
            current: words.first().copied().unwrap_or(0),
            base: 0,
            curr_idx: 0,
            words,
        }
    }
}

impl<'a> Iterator for BitsIterator<'a> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.current == 0 {
            for idx in self.curr_idx + 1..self.words.len() {
                self.base += MODULUS;
                if self.words[idx] != 0 {
                    self.current = self.words[idx];
                    self.curr_idx = idx;
                    break;
                }
            }
        }

        if self.current == 0 {
            return None;
        }

        let bit = self.current.trailing_zeros();
        self.current &= self.current - 1;
        Some(self.base + OFFSETS[bit as usize])
    }
}

/// Returns a sequence of `u64`s encoding the primes up to the square root of
/// the given limit, excluding 2, 3 and 5.
fn small_primes(limit: u64) -> Vec<u64> {
    let sqrt = (limit as f64).sqrt() as u64;
    let mut sieve = vec![!0u64; (sqrt / MODULUS + 1) as usize];
    let small_limit = MODULUS * sieve.len() as u64;

    // 1 is not prime and is the only non-prime offset in the first word.
    sieve[0] ^= 1;

    // Classic single-pass sieve of Eratosthenes: walk the bits in ascending
    // order, and for each one still standing (hence prime), cross off its
    // multiples ahead of the cursor. Scalar cursor state is copied out of
    // `sieve` before each mutation, so no aliasing is ever live.
    let mut word_idx = 0usize;
    let mut base = 0u64;
    let mut current = sieve[0];
    loop {
        while current == 0 {
            word_idx += 1;
            if word_idx >= sieve.len() {
                return sieve;
            }
            base += MODULUS;
            current = sieve[word_idx];
        }
        let bit = current.trailing_zeros();
        current &= current - 1;
        let prime = base + OFFSETS[bit as usize];
        if prime.saturating_mul(prime) >= small_limit {
            return sieve;
        }

        let mut wheel = Wheel30::new(prime, prime);
        let mut multiple = prime * prime;
        while multiple < small_limit {
            set_off(&mut sieve, multiple);
            multiple += wheel.next_diff();
        }
    }
}

/// Sieve primes up to `limit` using a segmented sieve of Eratosthenes,
/// returning a vector of wheel-30-encoded `u64` words (2, 3 and 5 excluded).
pub fn segmented_sieve(limit: u64) -> Vec<u64> {
    let lim = if limit % MODULUS == 0 {
        limit
    } else {
        limit + MODULUS - limit % MODULUS
    };
    let small = small_primes(lim);
    let small_primes_vec: Vec<u64> = BitsIterator::new(&small).collect();

    let mut segment = [!0u64; SEGMENT_LEN];
    segment[0] ^= 1;
    let mut segments = Vec::with_capacity((lim / MODULUS) as usize);

    let mut next_indices: Vec<(u64, Wheel30)> = Vec::new();
    let mut next_prime_idx = 0usize;

    let mut low = 0u64;
    while low < lim {
        let high = min(low + SEGMENT_SIZE, lim);
        let segment_size = high - low;

        while let Some(&prime) = small_primes_vec.get(next_prime_idx) {
            if prime.saturating_mul(prime) >= high {
                break;
            }
            next_indices.push((prime * prime - low, Wheel30::new(prime, prime)));
            next_prime_idx += 1;
        }

        for (index, wheel) in &mut next_indices {
            while *index < segment_size {
                set_off(&mut segment, *index);
                *index += wheel.next_diff();
            }
            *index -= segment_size;
        }

        segments.extend_from_slice(if segment_size < SEGMENT_SIZE {
            &segment[..(segment_size / MODULUS) as usize]
        } else {
            &segment
        });

        low += SEGMENT_SIZE;
        segment = [!0u64; SEGMENT_LEN];
    }

    segments
}

enum SmallPrime {
    Two,
    Three,
    Five,
    None,
}

/// A `Sieve` of all primes up to some limit, supporting iteration, primality
/// lookup and nth-prime queries. This is the library's internal prime source
/// — the combinatorial engines (D, A+C, S1, ...) all pull their "first few
/// primes" from one of these rather than re-deriving them.
pub struct Sieve {
    words: Vec<u64>,
    counts: Vec<u64>,
}

impl Sieve {
    /// Sieve all primes up to (at least) `limit`.
    pub fn to_limit(limit: u64) -> Sieve {
        let words = segmented_sieve(limit);
        Self::from_words(words)
    }

    /// Sieve enough primes to contain at least the first `n` primes (0-indexed).
    pub fn to_n_primes(n: usize) -> Sieve {
        let limit = nth_prime_upper_bound(n + 1);
        let words = segmented_sieve(limit);
        Self::from_words(words)
    }

    fn from_words(words: Vec<u64>) -> Sieve {
        let mut counts = Vec::with_capacity(words.len());
        let mut count = 3u64; // 2, 3, 5
        for w in &words {
            count += w.count_ones() as u64;
            counts.push(count);
        }
        Sieve { words, counts }
    }

    /// Highest number this sieve knows about (may exceed the requested limit).
    pub fn limit(&self) -> u64 {
        MODULUS * self.words.len() as u64
    }

    /// The raw wheel-30 bitmap word for block `i`, or 0 past the end.
    pub fn word(&self, i: usize) -> u64 {
        self.words.get(i).copied().unwrap_or(0)
    }

    /// Total number of primes known (including 2, 3, 5).
    pub fn num_primes(&self) -> u64 {
        self.counts.last().copied().unwrap_or(3)
    }

    pub fn iter(&self) -> PrimeIter<'_> {
        PrimeIter {
            small: SmallPrime::Two,
            inner: BitsIterator::new(&self.words),
        }
    }

    /// Ascending iterator over primes in `[lo, hi]`.
    pub fn range(&self, lo: u64, hi: u64) -> impl Iterator<Item = u64> + '_ {
        self.iter().skip_while(move |&p| p < lo).take_while(move |&p| p <= hi)
    }

    pub fn is_prime(&self, n: u64) -> bool {
        match n {
            2 | 3 | 5 => true,
            _ => n >= 2 && crate::segment::get(&self.words, n),
        }
    }

    /// 0-indexed nth prime (`nth_prime(0) == 2`), or `None` if the sieve does
    /// not know that many primes.
    pub fn nth_prime(&self, n: usize) -> Option<u64> {
        match n {
            0 => return Some(2),
            1 => return Some(3),
            2 => return Some(5),
            _ => {}
        }
        if n as u64 >= self.num_primes() {
            return None;
        }
        let target = n as u64 + 1; // counts[] holds cumulative counts incl. 2,3,5
        let idx = match self.counts.binary_search(&target) {
            Ok(mut x) => {
                while x > 0 && self.counts[x - 1] == target {
                    x -= 1;
                }
                x
            }
            Err(x) => x,
        };
        let preceding = if idx == 0 { 3 } else { self.counts[idx - 1] };
        let within = target - preceding - 1;
        let word = [self.words[idx]];
        BitsIterator::new(&word).nth(within as usize).map(|off| MODULUS * idx as u64 + off)
    }
}

pub struct PrimeIter<'a> {
    small: SmallPrime,
    inner: BitsIterator<'a>,
}

impl<'a> Iterator for PrimeIter<'a> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        match self.small {
            SmallPrime::Two => {
                self.small = SmallPrime::Three;
                return Some(2);
            }
            SmallPrime::Three => {
                self.small = SmallPrime::Five;
                return Some(3);
            }
            SmallPrime::Five => {
                self.small = SmallPrime::None;
                return Some(5);
            }
            SmallPrime::None => {}
        }
        self.inner.next()
    }
}

/// Upper bound for the nth (1-indexed) prime, per the PNT approximation on
/// Wikipedia — the same bound `feadoor-primesieve` already used.
pub fn nth_prime_upper_bound(n: usize) -> u64 {
    if n <= 5 {
        12
    } else {
        let f = n as f64;
        (f * (f.ln() + f.ln().ln())) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_segmented_sieve_matches_known_primes() {
        let sieve = segmented_sieve(1000);
        let primes: Vec<u64> = BitsIterator::new(&sieve).collect();
        assert_eq!(primes[..10], [7, 11, 13, 17, 19, 23, 29, 31, 37, 41]);
        assert_eq!(*primes.last().unwrap(), 997);
    }

    #[test]
    fn sieve_is_prime_matches_trial_division() {
        let sieve = Sieve::to_limit(10_000);
        for n in 0..10_000u64 {
            let expected = n >= 2 && (2..=((n as f64).sqrt() as u64)).all(|d| n % d != 0 || d == n);
            assert_eq!(sieve.is_prime(n), expected, "n={n}");
        }
    }

    #[test]
    fn nth_prime_matches_known_values() {
        let sieve = Sieve::to_n_primes(100);
        assert_eq!(sieve.nth_prime(0), Some(2));
        assert_eq!(sieve.nth_prime(1), Some(3));
        assert_eq!(sieve.nth_prime(2), Some(5));
        assert_eq!(sieve.nth_prime(3), Some(7));
        assert_eq!(sieve.nth_prime(24), Some(97));
    }

    #[test]
    fn range_is_ascending_and_bounded() {
        let sieve = Sieve::to_limit(1000);
        let v: Vec<u64> = sieve.range(50, 100).collect();
        assert_eq!(v, vec![53, 59, 61, 67, 71, 73, 79, 83, 89, 97]);
    }
}
