//! Error type (spec.md §7): every public API function returns
//! `Result<T, PrimecountError>`; internal hot loops never construct or
//! propagate errors, since the orchestrator validates its inputs once
//! up front.

use thiserror::Error;

/// Errors the public API (component C13) can return.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PrimecountError {
    /// `x` (or the derived `nth_prime` search bound) is outside the range
    /// this crate's algorithms support.
    #[error("x={x} exceeds the supported range (max {max})")]
    RangeError { x: u128, max: u128 },

    /// A requested allocation (PiTable, FactorTable, sieve segment) would
    /// exceed practical memory for this process.
    #[error("allocation of {bytes} bytes for {what} would exceed the configured limit")]
    AllocError { what: &'static str, bytes: u64 },

    /// A CLI flag or API argument failed validation (e.g. `threads == 0`
    /// where at least one is required, or an alpha override `< 1.0`).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, PrimecountError>;
