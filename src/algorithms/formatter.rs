//! Thread-safe "best so far" tracking shared by every algorithm entry
//! point (spec §2 "Algorithm formatter", §5 "new solution callback").

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::solution::Solution;
use crate::timer::Timer;
use crate::types::{Cost, Counter, Seed};

/// Invoked whenever the formatter records a strict improvement. Must be
/// thread-safe: local search and LNS call it from whichever thread is
/// running the algorithm.
pub type NewSolutionCallback = Arc<dyn Fn(&Solution, Cost, f64) + Send + Sync>;

/// One row of the JSON report's `IntermediaryOutputs` array.
#[derive(Debug, Clone, Serialize)]
pub struct IntermediaryOutput {
    pub cost: Cost,
    pub bound: Cost,
    pub time: f64,
}

/// Fields shared by every algorithm's `Parameters` (spec §6's common CLI
/// flags): deadline, seed, stopping goal, iteration caps, and the
/// callback invoked on every improvement.
#[derive(Clone)]
pub struct AlgorithmParameters {
    pub timer: Timer,
    pub seed: Seed,
    /// Stop as soon as the best cost reaches this value.
    pub goal: Option<Cost>,
    pub verbosity_level: u8,
    pub maximum_number_of_iterations: Option<Counter>,
    pub maximum_number_of_iterations_without_improvement: Option<Counter>,
    /// How often (in iterations) the inner loop offers its working
    /// solution to the formatter (spec §4.4 "best-so-far capture").
    pub best_solution_update_frequency: Counter,
    pub new_solution_callback: Option<NewSolutionCallback>,
}

impl std::fmt::Debug for AlgorithmParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmParameters")
            .field("seed", &self.seed)
            .field("goal", &self.goal)
            .field("verbosity_level", &self.verbosity_level)
            .field(
                "maximum_number_of_iterations",
                &self.maximum_number_of_iterations,
            )
            .field(
                "maximum_number_of_iterations_without_improvement",
                &self.maximum_number_of_iterations_without_improvement,
            )
            .field(
                "best_solution_update_frequency",
                &self.best_solution_update_frequency,
            )
            .finish_non_exhaustive()
    }
}

impl Default for AlgorithmParameters {
    fn default() -> Self {
        Self {
            timer: Timer::unbounded(),
            seed: 0,
            goal: None,
            verbosity_level: 0,
            maximum_number_of_iterations: None,
            maximum_number_of_iterations_without_improvement: None,
            best_solution_update_frequency: 1,
            new_solution_callback: None,
        }
    }
}

/// Fields shared by every algorithm's `Output`.
pub struct AlgorithmOutput {
    pub solution: Solution,
    pub bound: Cost,
    pub time: f64,
    pub intermediary_outputs: Vec<IntermediaryOutput>,
}

struct BestState {
    solution: Solution,
    cost: Cost,
    intermediary_outputs: Vec<IntermediaryOutput>,
}

/// Owns the best solution found so far and publishes strict improvements.
///
/// `update` is safe to call from whichever thread is driving the search;
/// it materializes the candidate into the held best [`Solution`] via
/// [`Solution::copy_from`] rather than cloning the whole instance handle
/// on every call.
pub struct AlgorithmFormatter {
    best: Mutex<BestState>,
    timer: Timer,
    callback: Option<NewSolutionCallback>,
    verbosity_level: u8,
}

impl AlgorithmFormatter {
    pub fn new(initial: Solution, parameters: &AlgorithmParameters) -> Self {
        let cost = initial.cost();
        Self {
            best: Mutex::new(BestState {
                solution: initial,
                cost,
                intermediary_outputs: Vec::new(),
            }),
            timer: parameters.timer.clone(),
            callback: parameters.new_solution_callback.clone(),
            verbosity_level: parameters.verbosity_level,
        }
    }

    /// Offer `candidate` as a new solution. If it strictly improves on the
    /// held best, record it, snapshot it for the JSON report, log it (if
    /// `verbosity_level > 0`), and invoke the new-solution callback.
    /// Returns whether the candidate was accepted.
    pub fn update(&self, candidate: &Solution, bound: Cost) -> bool {
        let mut state = self.best.lock().expect("formatter mutex poisoned");
        if candidate.cost() >= state.cost {
            return false;
        }
        state.solution.copy_from(candidate);
        state.cost = candidate.cost();
        let time = self.timer.elapsed_seconds();
        state.intermediary_outputs.push(IntermediaryOutput {
            cost: state.cost,
            bound,
            time,
        });
        if self.verbosity_level > 0 {
            eprintln!("c new best solution: cost {} (t = {time:.3}s)", state.cost);
        }
        if let Some(callback) = &self.callback {
            callback(&state.solution, state.cost, time);
        }
        true
    }

    pub fn best_cost(&self) -> Cost {
        self.best.lock().expect("formatter mutex poisoned").cost
    }

    /// `true` once the goal (if any) has been reached.
    pub fn goal_reached(&self, goal: Option<Cost>) -> bool {
        match goal {
            Some(goal) => self.best_cost() <= goal,
            None => false,
        }
    }

    /// Consume the formatter, producing the algorithm's output with
    /// `bound` as the reported lower bound.
    pub fn finish(self, bound: Cost) -> AlgorithmOutput {
        let time = self.timer.elapsed_seconds();
        let state = self.best.into_inner().expect("formatter mutex poisoned");
        AlgorithmOutput {
            solution: state.solution,
            bound,
            time,
            intermediary_outputs: state.intermediary_outputs,
        }
    }
}

#[cfg(test)]
#[path = "../tests_unit/algorithms/formatter.rs"]
mod tests;
