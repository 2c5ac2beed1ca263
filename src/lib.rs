//! Count primes below x using combinatorial algorithms
//! (Meissel-Lagarias-Miller-Odlyzko, Deleglise-Rivat, Gourdon).
//!
//! The public surface is [`pi`]/[`pi_with_threads`]/[`pi_with_overrides`],
//! [`nth_prime`] and [`phi`]; everything else is an internal collaborator
//! the orchestrator (`orchestrator.rs`, component C13) assembles from.

mod alpha;
mod approx;
mod aux;
mod bitsieve240;
mod dr;
mod error;
mod factortable;
mod gourdon;
mod legendre;
mod lmo;
mod load_balancer;
mod meissel;
mod orchestrator;
mod p2;
mod phi;
mod pitable;
mod popcount;
mod primesieve;
mod segment;
mod segmented_pitable;
mod sieve;
mod util;
mod wheel;

pub use alpha::{AlphaOverrides, AlphaTuning};
pub use approx::{li, li_inverse, li_offset, nth_prime_approx, riemann_r, riemann_r_inverse};
pub use dr::{pi_deleglise_rivat, pi_deleglise_rivat_with_threads};
pub use error::{PrimecountError, Result};
pub use gourdon::{pi_gourdon, pi_gourdon_with_threads};
pub use legendre::pi_legendre;
pub use lmo::pi_lmo;
pub use meissel::pi_meissel;
pub use orchestrator::{nth_prime, phi, pi, pi_with_overrides, pi_with_threads, MAX_NTH_PRIME_N};
pub use pitable::PiTable;
pub use util::{icbrt, isqrt};

/// Re-exported for the CLI's debug-oriented `--S1`/`--S2-trivial`/`--B`/
/// `--Phi0`/`--D` flags; not part of the stable library surface spec.md §6
/// actually specifies (that's just [`pi`]/[`nth_prime`]/[`phi`]/the `li`
/// family).
pub mod debug {
    pub use crate::aux::{b_sum, phi0, s1, s2_trivial};
    pub use crate::dr::s2;
    pub use crate::factortable::FactorTable;
    pub use crate::phi::get_c;
}

/// The plain segmented sieve of Eratosthenes (component C3): an internal
/// prime source the combinatorial engines pull from, exposed at the crate
/// root under its own name since [`sieve`] (component C7, the combinatorial
/// cross-off engine) already claims the un-prefixed name `Sieve` internally.
pub use primesieve::Sieve as PrimeSieve;
