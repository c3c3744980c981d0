//! Structured status reporting (component L): a small façade in place of a
//! generic logging crate, matching the host engine's own `benchmark`/
//! `report` modules — a `Timer` for elapsed milliseconds, two emission
//! points gated by the CLI's `--status`/`--verbose` flags, and a
//! thread-local suppression flag so a worker's internal recursive search
//! doesn't spam one line per separator attempt.

use scoped_tls::scoped_thread_local;
use serde::Serialize;
use std::cell::Cell;
use std::time::Instant;

scoped_thread_local!(static REPORTING_BLOCKED: Cell<bool>);

/// Milliseconds elapsed since construction.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer { start: Instant::now() }
    }

    pub fn get_passed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ImprovementEvent<'a> {
    event: &'a str,
    depth: u32,
    elapsed_ms: u64,
    worker: &'a str,
}

#[derive(Serialize)]
struct CandidateEvent<'a> {
    event: &'a str,
    depth: u32,
    elapsed_ms: u64,
    worker: &'a str,
    discarded: bool,
}

/// Fires whenever a worker installs a new best decomposition. Gated on
/// `--status` (and thus also fires under `--verbose`).
pub fn report_improvement(status_enabled: bool, timer: &Timer, depth: u32, worker: &str) {
    if !status_enabled || reporting_is_blocked() {
        return;
    }
    emit(&ImprovementEvent {
        event: "improvement",
        depth,
        elapsed_ms: timer.get_passed_ms(),
        worker,
    });
}

/// Fires for every completed search regardless of whether it improved the
/// shared best. Gated on `--verbose` only.
pub fn report_candidate(verbose_enabled: bool, timer: &Timer, depth: u32, worker: &str, discarded: bool) {
    if !verbose_enabled || reporting_is_blocked() {
        return;
    }
    emit(&CandidateEvent {
        event: "candidate",
        depth,
        elapsed_ms: timer.get_passed_ms(),
        worker,
        discarded,
    });
}

fn reporting_is_blocked() -> bool {
    REPORTING_BLOCKED.is_set() && REPORTING_BLOCKED.with(Cell::get)
}

fn emit<T: Serialize>(event: &T) {
    if let Ok(line) = serde_json::to_string(event) {
        eprintln!("{}", line);
    }
}

/// Run `f` with reporting suppressed for its duration, so only the
/// outermost call site (the worker loop) emits status lines even though
/// the nested-dissection recursion may itself invoke the separator search
/// many times.
pub fn block_reporting<F: FnOnce() -> R, R>(f: F) -> R {
    let blocked = Cell::new(true);
    REPORTING_BLOCKED.set(&blocked, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_reporting_suppresses_nested_calls() {
        assert!(!reporting_is_blocked());
        block_reporting(|| {
            assert!(reporting_is_blocked());
        });
        assert!(!reporting_is_blocked());
    }
}
