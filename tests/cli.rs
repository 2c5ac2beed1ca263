//! CLI integration tests for the `primecount` binary (spec.md §6).
//!
//! Spawns the compiled binary via `assert_cmd` and asserts on exit code and
//! stdout, the same way the retrieval pack's other CLI crates test theirs.

use assert_cmd::Command;
use predicates::prelude::*;

fn primecount() -> Command {
    Command::cargo_bin("primecount").unwrap()
}

#[test]
fn help_lists_mode_flags() {
    primecount().arg("--help").assert().success().stdout(
        predicate::str::contains("--nth-prime")
            .and(predicate::str::contains("--phi"))
            .and(predicate::str::contains("--legendre"))
            .and(predicate::str::contains("--meissel"))
            .and(predicate::str::contains("--deleglise-rivat"))
            .and(predicate::str::contains("--gourdon")),
    );
}

#[test]
fn default_mode_computes_pi() {
    primecount().arg("100").assert().success().stdout(predicate::str::contains("25"));
}

#[test]
fn pi_of_ten_is_four() {
    primecount().arg("10").assert().success().stdout(predicate::str::diff("4\n"));
}

#[test]
fn pi_of_million_matches_known_value() {
    primecount().arg("1000000").assert().success().stdout(predicate::str::diff("78498\n"));
}

#[test]
fn legendre_flag_matches_default() {
    primecount().args(["--legendre", "100000"]).assert().success().stdout(predicate::str::diff("9592\n"));
}

#[test]
fn meissel_flag_matches_legendre() {
    primecount().args(["--meissel", "100000"]).assert().success().stdout(predicate::str::diff("9592\n"));
}

#[test]
fn lmo_flag_matches_legendre() {
    primecount().args(["--lmo", "100000"]).assert().success().stdout(predicate::str::diff("9592\n"));
}

#[test]
fn deleglise_rivat_flag_matches_legendre() {
    primecount()
        .args(["--deleglise-rivat", "100000"])
        .assert()
        .success()
        .stdout(predicate::str::diff("9592\n"));
}

#[test]
fn gourdon_flag_matches_legendre() {
    primecount().args(["--gourdon", "100000"]).assert().success().stdout(predicate::str::diff("9592\n"));
}

#[test]
fn nth_prime_flag() {
    primecount().args(["--nth-prime", "1000"]).assert().success().stdout(predicate::str::diff("7919\n"));
}

#[test]
fn phi_flag_requires_two_arguments() {
    primecount().args(["--phi", "100", "4"]).assert().success().stdout(predicate::str::diff("22\n"));
}

#[test]
fn phi_flag_without_a_fails() {
    primecount().args(["--phi", "100"]).assert().failure().stderr(predicate::str::contains("requires a second argument"));
}

#[test]
fn missing_x_fails() {
    primecount().assert().failure().stderr(predicate::str::contains("missing required argument x"));
}

#[test]
fn x_above_u64_max_is_rejected() {
    primecount()
        .arg("99999999999999999999999999999999999999")
        .assert()
        .failure();
}

#[test]
fn sigma_flag_is_explicitly_unimplemented() {
    primecount()
        .args(["--Sigma", "100", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not independently implemented"));
}

#[test]
fn zero_threads_is_rejected() {
    primecount().args(["--threads", "0", "100"]).assert().failure();
}

#[test]
fn li_flag_runs() {
    primecount().args(["--Li", "1000"]).assert().success();
}
