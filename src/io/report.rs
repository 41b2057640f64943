//! The JSON report shape (spec §6 "JSON output"): an object with an
//! echoed `Parameters` block plus one entry per algorithm run, each
//! carrying `Solution.Cost`, `Bound`, the two optimality gaps, `Time`,
//! and the `IntermediaryOutputs` improvement trail.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::algorithms::formatter::{AlgorithmOutput, IntermediaryOutput};
use crate::types::Cost;

/// One row of `IntermediaryOutputs`.
#[derive(Debug, Clone, Serialize)]
pub struct IntermediaryOutputJson {
    #[serde(rename = "Cost")]
    pub cost: Cost,
    #[serde(rename = "Bound")]
    pub bound: Cost,
    #[serde(rename = "Time")]
    pub time: f64,
}

impl From<&IntermediaryOutput> for IntermediaryOutputJson {
    fn from(value: &IntermediaryOutput) -> Self {
        Self {
            cost: value.cost,
            bound: value.bound,
            time: value.time,
        }
    }
}

/// The nested `Solution` object carrying just the cost, per spec §6.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionCost {
    #[serde(rename = "Cost")]
    pub cost: Cost,
}

/// The report for a single algorithm run.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionReport {
    #[serde(rename = "Solution")]
    pub solution: SolutionCost,
    #[serde(rename = "Bound")]
    pub bound: Cost,
    #[serde(rename = "AbsoluteOptimalityGap")]
    pub absolute_optimality_gap: Cost,
    #[serde(rename = "RelativeOptimalityGap")]
    pub relative_optimality_gap: f64,
    #[serde(rename = "Time")]
    pub time: f64,
    #[serde(rename = "IntermediaryOutputs")]
    pub intermediary_outputs: Vec<IntermediaryOutputJson>,
}

impl SolutionReport {
    /// Build a report row from an algorithm's raw output.
    pub fn from_output(output: &AlgorithmOutput) -> Self {
        let cost = output.solution.cost();
        let bound = output.bound;
        let absolute_optimality_gap = cost - bound;
        let relative_optimality_gap = if bound == 0 {
            0.0
        } else {
            absolute_optimality_gap as f64 / bound as f64
        };
        Self {
            solution: SolutionCost { cost },
            bound,
            absolute_optimality_gap,
            relative_optimality_gap,
            time: output.time,
            intermediary_outputs: output.intermediary_outputs.iter().map(Into::into).collect(),
        }
    }
}

/// The full report written to `--output`: echoed parameters plus one
/// [`SolutionReport`] per algorithm run (almost always just one, but the
/// shape allows a caller to merge several runs of the same instance).
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(rename = "Parameters")]
    pub parameters: serde_json::Value,
    #[serde(flatten)]
    pub algorithms: BTreeMap<String, SolutionReport>,
}

impl Report {
    pub fn new(parameters: serde_json::Value) -> Self {
        Self {
            parameters,
            algorithms: BTreeMap::new(),
        }
    }

    pub fn with_algorithm(mut self, name: impl Into<String>, output: &AlgorithmOutput) -> Self {
        self.algorithms.insert(name.into(), SolutionReport::from_output(output));
        self
    }

    pub fn to_json_string_pretty(&self) -> crate::error::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::SetCoverError::Io(format!("failed to serialize JSON report: {e}")))
    }
}

#[cfg(test)]
#[path = "../tests_unit/io/report.rs"]
mod tests;
