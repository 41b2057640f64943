//! Optional MILP back-end (spec §6's `milp-cbc`/`milp-gurobi`/`milp-highs`
//! `--algorithm` values): a direct binary-integer formulation solved to
//! optimality by whichever `good_lp` backend the CLI was built with.
//!
//! Formulation: one binary variable per set, minimise the sum of chosen
//! costs subject to one `>= 1` constraint per element over its covering
//! sets. There is no time-limit plumbing here (good_lp's per-backend
//! solver options differ too much to unify cheaply); a backend that is
//! not compiled in, or that fails to solve, reports
//! [`MilpStatus::Unavailable`]/[`MilpStatus::Failed`] rather than
//! panicking, per spec §7 "Solver back-end failure".

use std::sync::Arc;

use crate::algorithms::formatter::{AlgorithmFormatter, AlgorithmOutput, AlgorithmParameters};
use crate::instance::Instance;
use crate::solution::Solution;

/// Which `good_lp` backend to dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilpBackend {
    Highs,
    CoinCbc,
    /// No free-standing Gurobi crate exists in the registry; this variant
    /// always reports [`MilpStatus::Unavailable`].
    Gurobi,
}

/// Outcome of a MILP solve attempt, surfaced alongside the (possibly
/// empty) solution rather than propagated as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilpStatus {
    /// Solved to proven optimality.
    Optimal,
    /// The requested backend was not compiled into this binary.
    Unavailable,
    /// The backend was invoked but returned an error (infeasible model,
    /// solver crash, etc.).
    Failed,
}

/// Result of [`solve`]: the usual algorithm output plus a status flag.
pub struct MilpOutput {
    pub output: AlgorithmOutput,
    pub status: MilpStatus,
}

fn unavailable(instance: &Arc<Instance>, parameters: &AlgorithmParameters) -> MilpOutput {
    let formatter = AlgorithmFormatter::new(Solution::new(Arc::clone(instance)), parameters);
    MilpOutput {
        output: formatter.finish(0),
        status: MilpStatus::Unavailable,
    }
}

fn failed(instance: &Arc<Instance>, parameters: &AlgorithmParameters) -> MilpOutput {
    let formatter = AlgorithmFormatter::new(Solution::new(Arc::clone(instance)), parameters);
    MilpOutput {
        output: formatter.finish(0),
        status: MilpStatus::Failed,
    }
}

/// Solve `instance` to optimality with `backend`, reporting the result
/// through the usual [`AlgorithmFormatter`]/[`AlgorithmOutput`] pair.
pub fn solve(instance: Arc<Instance>, backend: MilpBackend, parameters: AlgorithmParameters) -> MilpOutput {
    if instance.number_of_elements() == 0 {
        let formatter = AlgorithmFormatter::new(Solution::new(Arc::clone(&instance)), &parameters);
        return MilpOutput {
            output: formatter.finish(0),
            status: MilpStatus::Optimal,
        };
    }

    match backend {
        MilpBackend::Gurobi => unavailable(&instance, &parameters),
        #[cfg(feature = "milp-highs")]
        MilpBackend::Highs => solve_with(&instance, &parameters, good_lp::highs),
        #[cfg(not(feature = "milp-highs"))]
        MilpBackend::Highs => unavailable(&instance, &parameters),
        #[cfg(feature = "milp-coin-cbc")]
        MilpBackend::CoinCbc => solve_with(&instance, &parameters, good_lp::coin_cbc),
        #[cfg(not(feature = "milp-coin-cbc"))]
        MilpBackend::CoinCbc => unavailable(&instance, &parameters),
    }
}

#[cfg(any(feature = "milp-highs", feature = "milp-coin-cbc"))]
fn solve_with<S, F>(instance: &Arc<Instance>, parameters: &AlgorithmParameters, using: F) -> MilpOutput
where
    F: FnOnce(good_lp::UnsolvedProblem) -> S,
    S: good_lp::SolverModel,
{
    use good_lp::{variable, Expression, ProblemVariables, Solution as LpSolution, SolverModel};

    let number_of_sets = instance.number_of_sets();
    let mut vars_builder = ProblemVariables::new();
    let vars: Vec<_> = (0..number_of_sets).map(|_| vars_builder.add(variable().binary())).collect();

    let objective: Expression = (0..number_of_sets)
        .map(|set_id| instance.set(set_id).cost as f64 * vars[set_id])
        .sum();

    let mut model = vars_builder.minimise(&objective).using(using);
    for element in instance.elements() {
        let lhs: Expression = element.sets.iter().map(|&set_id| vars[set_id]).sum();
        model = model.with(lhs.geq(1.0));
    }

    let solved = match model.solve() {
        Ok(solved) => solved,
        Err(_) => return failed(instance, parameters),
    };

    let mut solution = Solution::new(Arc::clone(instance));
    for set_id in 0..number_of_sets {
        if solved.value(vars[set_id]).round() as i64 == 1 {
            solution.add(set_id);
        }
    }

    let bound = solution.cost();
    let formatter = AlgorithmFormatter::new(Solution::new(Arc::clone(instance)), parameters);
    formatter.update(&solution, bound);
    MilpOutput {
        output: formatter.finish(bound),
        status: MilpStatus::Optimal,
    }
}

#[cfg(test)]
#[path = "../tests_unit/algorithms/milp.rs"]
mod tests;
