//! Dynamic load balancer (component C9, spec.md §4.11): hands out
//! `(low, segments, segment_size)` work units to the D/A+C worker threads,
//! ramping segment size up geometrically until the first non-zero partial
//! sum, then tracking each worker's elapsed time to keep total runtime
//! predictable.
//!
//! Ported from spec.md §4.11's formulae directly — these are pure
//! arithmetic, not a subtle data structure, so there is little room for a
//! "documented simplification" here; the mutex-guarded cursor is the
//! textbook `std::sync::Mutex` shape SPEC_FULL.md §5 calls for.

use std::sync::Mutex;
use std::time::Duration;

const MODULUS: u64 = 240;

fn round_to_segment(n: u64) -> u64 {
    if n % MODULUS == 0 {
        n.max(MODULUS)
    } else {
        n + MODULUS - n % MODULUS
    }
}

/// One work unit handed to a worker thread.
#[derive(Debug, Clone, Copy)]
pub struct ThreadSettings {
    pub low: u64,
    pub segments: u64,
    pub segment_size: u64,
}

/// What a worker reports back after finishing a work unit.
#[derive(Debug, Clone, Copy)]
pub struct WorkerReport {
    pub sum: i64,
    pub secs: f64,
    pub init_secs: f64,
}

struct State {
    low: u64,
    sieve_limit: u64,
    segment_size: u64,
    segments: u64,
    ramping_up: bool,
    sum: i64,
    percent: f64,
}

/// Mutex-guarded segment cursor shared by every worker thread.
pub struct LoadBalancer {
    state: Mutex<State>,
    l1_cache_bytes: u64,
}

impl LoadBalancer {
    pub fn new(sieve_limit: u64, initial_segment_size: u64) -> LoadBalancer {
        LoadBalancer {
            state: Mutex::new(State {
                low: 0,
                sieve_limit,
                segment_size: round_to_segment(initial_segment_size),
                segments: 1,
                ramping_up: true,
                sum: 0,
                percent: 0.0,
            }),
            l1_cache_bytes: 32 * 1024,
        }
    }

    /// Returns the next work unit, or `None` once `low` has passed
    /// `sieve_limit` (termination signal).
    pub fn get_work(&self, report: Option<WorkerReport>) -> Option<ThreadSettings> {
        let mut state = self.state.lock().expect("load balancer mutex poisoned");

        if let Some(r) = report {
            state.sum = state.sum.wrapping_add(r.sum);
            if state.ramping_up && r.sum != 0 {
                state.ramping_up = false;
            }

            if state.ramping_up {
                let cap = round_to_segment(
                    ((state.sieve_limit as f64).sqrt() as u64).max(self.l1_cache_bytes * 30),
                );
                state.segment_size = round_to_segment((state.segment_size * 2).min(cap));
            } else {
                let factor = Self::steady_state_factor(r, state.percent);
                let secs = r.secs.max(1e-9);
                if secs * factor < Self::min_secs() {
                    state.segments *= 2;
                } else {
                    state.segments = ((state.segments as f64 * factor).round() as u64).max(1);
                }
            }

            let total = state.low as f64 / state.sieve_limit.max(1) as f64 * 100.0;
            state.percent = total.min(100.0);
            tracing::debug!(percent = state.percent, low = state.low, "load balancer progress");
        }

        if state.low > state.sieve_limit {
            return None;
        }

        let settings = ThreadSettings {
            low: state.low,
            segments: state.segments,
            segment_size: state.segment_size,
        };
        state.low += state.segments * state.segment_size;
        Some(settings)
    }

    fn min_secs() -> f64 {
        0.02
    }

    /// spec.md §4.11 step 2's factor computation, given a completed
    /// worker's timing report and the overall percent-complete so far.
    fn steady_state_factor(report: WorkerReport, percent: f64) -> f64 {
        let percent = percent.max(0.01); // never let the divisor blow up near 0%.
        let total_elapsed = report.secs.max(1e-9);
        let remaining_secs = total_elapsed * (100.0 / percent - 1.0) / 3.0;

        let min_secs = Self::min_secs();
        let mut factor = remaining_secs / total_elapsed.max(min_secs);

        let init_secs = report.init_secs.max(1e-9);
        let init_factor = (21_600.0 / init_secs).clamp(50.0, 5000.0);
        if report.secs > init_secs * init_factor {
            factor = factor.min(init_secs * init_factor / report.secs);
        }

        if report.secs * factor < init_secs * 20.0 {
            factor = (init_secs * 20.0) / report.secs.max(1e-9);
        }

        factor.clamp(0.5, 2.0)
    }
}

/// Runs `work` across `threads` OS threads, accumulating each worker's
/// `i64` partial sum under the balancer's mutex (spec.md §4.12: associative
/// addition, any claim order). `work(low, segments, segment_size)` returns
/// the worker's partial sum for that unit.
pub fn run_balanced<F>(sieve_limit: u64, initial_segment_size: u64, threads: usize, work: F) -> i64
where
    F: Fn(u64, u64, u64) -> i64 + Sync,
{
    let balancer = LoadBalancer::new(sieve_limit, initial_segment_size);
    let threads = threads.max(1);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let balancer = &balancer;
                let work = &work;
                scope.spawn(move || {
                    let mut local_sum = 0i64;
                    let mut report = None;
                    while let Some(settings) = balancer.get_work(report) {
                        let start = std::time::Instant::now();
                        let sum = work(settings.low, settings.segments, settings.segment_size);
                        let secs = start.elapsed().as_secs_f64();
                        local_sum = local_sum.wrapping_add(sum);
                        report = Some(WorkerReport {
                            sum,
                            secs,
                            init_secs: secs.max(1e-6),
                        });
                    }
                    local_sum
                })
            })
            .collect();

        handles.into_iter().fold(0i64, |acc, h| acc.wrapping_add(h.join().unwrap_or(0)))
    })
}

/// Lets callers without a preference fall back to a short default sleep
/// between balancer polls in interactive/status mode — unused in the hot
/// path, kept for the CLI's `-s/--status` ticker.
pub fn status_tick_interval() -> Duration {
    Duration::from_millis(200)
}
