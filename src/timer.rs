//! Cooperative deadline and interruption signalling (spec §5).
//!
//! The reduction engine, the row-weighting local search, and the LNS all
//! poll [`Timer::needs_to_end`] at every outer iteration (and, for the
//! reduction engine, inside rules that loop over all sets/elements). There
//! is no forced abort: on a positive poll, the caller returns its current
//! best output cleanly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A deadline plus a cooperative interrupt flag, shared read-only with
/// worker code and writable (the interrupt flag) from a signal handler or
/// the CLI's Ctrl-C hook.
#[derive(Clone)]
pub struct Timer {
    start: Instant,
    time_limit: Option<Duration>,
    interrupted: Arc<AtomicBool>,
}

impl Timer {
    /// A timer with no deadline and no interrupt source.
    pub fn unbounded() -> Self {
        Self {
            start: Instant::now(),
            time_limit: None,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A timer that expires `time_limit` after construction.
    pub fn with_limit(time_limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            time_limit: Some(time_limit),
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A clone of the interrupt flag, for a signal handler to flip.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    /// Flag this timer as interrupted (e.g. from a SIGINT handler).
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::Relaxed);
    }

    /// `true` once the deadline has passed or the interrupt flag is set.
    #[inline]
    pub fn needs_to_end(&self) -> bool {
        if self.interrupted.load(Ordering::Relaxed) {
            return true;
        }
        match self.time_limit {
            Some(limit) => self.start.elapsed() >= limit,
            None => false,
        }
    }

    /// Seconds elapsed since construction.
    pub fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
#[path = "tests_unit/timer.rs"]
mod tests;
