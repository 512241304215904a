//! Wall-clock budgeting and search statistics.
//!
//! Search loops poll a [`TimeBudget`] once per iteration; there is no
//! preemption.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A running clock with a usable limit of `budget - safety_margin`.
#[derive(Clone, Copy, Debug)]
pub struct TimeBudget {
    started: Instant,
    limit: Duration,
}

impl TimeBudget {
    /// Start the clock now.
    ///
    /// A budget smaller than the margin leaves no usable time.
    pub fn start(budget: Duration, safety_margin: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit: budget.saturating_sub(safety_margin),
        }
    }

    /// Split `budget` evenly across `parts` slices.
    pub fn slice(budget: Duration, parts: usize) -> Duration {
        budget / parts.max(1) as u32
    }

    /// True while the usable part of the budget has not run out.
    pub fn has_time_left(&self) -> bool {
        self.started.elapsed() < self.limit
    }

    /// Time since the clock started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Usable time after the safety margin.
    pub fn limit(&self) -> Duration {
        self.limit
    }
}

/// Counters for one `think` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Completed select/expand/simulate/backpropagate passes.
    pub iterations: u64,

    /// Forward-model steps, including root expansion.
    pub forward_model_calls: u64,

    /// Nodes allocated in the tree.
    pub nodes: usize,

    /// Wall-clock time spent thinking.
    pub elapsed: Duration,
}

impl SearchStats {
    /// Iterations per second, or 0 if no time was measured.
    pub fn iterations_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.iterations as f64 / secs
        } else {
            0.0
        }
    }
}
