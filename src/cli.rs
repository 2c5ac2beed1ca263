//! Command-line argument parsing (external collaborator, SPEC_FULL.md §2):
//! a minimal `clap`-derive surface exposing the flags from spec.md §6 that
//! have semantic effect on the core. A full arithmetic expression evaluator
//! for the positional `x` argument is an explicit non-goal (spec.md §1); `x`
//! is a plain non-negative decimal integer.

use clap::Parser;

/// Count primes below x using combinatorial algorithms.
#[derive(Parser, Debug)]
#[command(name = "primecount", version, about)]
pub struct Cli {
    /// The number to operate on (interpretation depends on which mode flag
    /// is passed; defaults to computing pi(x)).
    pub x: Option<u128>,

    /// Second operand for two-argument operations (phi(x, a), --P2, --S1,
    /// --S2-easy, --S2-hard, --S2-trivial, --B, --D, --AC, --Phi0, --Sigma).
    pub a: Option<u64>,

    /// Number of worker threads (default: logical CPU count).
    #[arg(short = 't', long = "threads")]
    pub threads: Option<usize>,

    /// Override the alpha tuning factor (Legendre-Miller-Odlyzko /
    /// Deleglise-Rivat).
    #[arg(short = 'a', long = "alpha")]
    pub alpha: Option<f64>,

    /// Override Gourdon's alpha_y tuning factor.
    #[arg(long = "alpha-y")]
    pub alpha_y: Option<f64>,

    /// Override Gourdon's alpha_z tuning factor.
    #[arg(long = "alpha-z")]
    pub alpha_z: Option<f64>,

    /// Print progress status to stderr while running.
    #[arg(short = 's', long = "status")]
    pub status: bool,

    /// Force the Deleglise-Rivat algorithm.
    #[arg(long = "deleglise-rivat")]
    pub deleglise_rivat: bool,

    /// Force Xavier Gourdon's algorithm.
    #[arg(long = "gourdon")]
    pub gourdon: bool,

    /// Force Gourdon's algorithm, 64-bit path.
    #[arg(long = "gourdon-64")]
    pub gourdon_64: bool,

    /// Force Gourdon's algorithm, 128-bit path.
    #[arg(long = "gourdon-128")]
    pub gourdon_128: bool,

    /// Force Meissel's formula.
    #[arg(long = "meissel")]
    pub meissel: bool,

    /// Force Legendre's formula.
    #[arg(long = "legendre")]
    pub legendre: bool,

    /// Force the LMO formula.
    #[arg(long = "lmo")]
    pub lmo: bool,

    /// Compute the nth prime instead of pi(x).
    #[arg(long = "nth-prime")]
    pub nth_prime: bool,

    /// Compute phi(x, a) instead of pi(x) (requires the second `a`
    /// argument).
    #[arg(long = "phi")]
    pub phi: bool,

    /// Compute P2(x, a).
    #[arg(long = "P2")]
    pub p2: bool,

    /// Compute S1(x, y, c).
    #[arg(long = "S1")]
    pub s1: bool,

    /// Compute the easy-leaves part of S2(x, y).
    #[arg(long = "S2-easy")]
    pub s2_easy: bool,

    /// Compute the hard-leaves part of S2(x, y).
    #[arg(long = "S2-hard")]
    pub s2_hard: bool,

    /// Compute S2_trivial(y, a, c).
    #[arg(long = "S2-trivial")]
    pub s2_trivial: bool,

    /// Compute the A+C term directly.
    #[arg(long = "AC")]
    pub ac: bool,

    /// Compute B(x, y).
    #[arg(short = 'B', long = "B")]
    pub b: bool,

    /// Compute D(x, y) (alias for the hard leaves of S2).
    #[arg(short = 'D', long = "D")]
    pub d: bool,

    /// Compute Phi0(x, c).
    #[arg(long = "Phi0")]
    pub phi0: bool,

    /// Compute one of Gourdon's Sigma summations (not independently
    /// implemented — see `gourdon.rs`'s module docs and DESIGN.md).
    #[arg(long = "Sigma")]
    pub sigma: bool,

    /// Compute li(x).
    #[arg(long = "Li")]
    pub li: bool,

    /// Compute Li_inverse(x).
    #[arg(long = "Li-inverse")]
    pub li_inverse: bool,

    /// Compute RiemannR(x).
    #[arg(long = "RiemannR")]
    pub riemann_r: bool,

    /// Compute RiemannR_inverse(x).
    #[arg(long = "RiemannR-inverse")]
    pub riemann_r_inverse: bool,
}

impl Cli {
    pub fn alpha_overrides(&self) -> primecount::AlphaOverrides {
        primecount::AlphaOverrides {
            alpha: self.alpha,
            alpha_y: self.alpha_y,
            alpha_z: self.alpha_z,
        }
    }
}
