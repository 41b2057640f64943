use super::*;
use crate::algorithms::formatter::IntermediaryOutput;
use crate::instance::InstanceBuilder;
use crate::solution::Solution;
use std::sync::Arc;

fn sample_output(cost: crate::types::Cost, bound: crate::types::Cost) -> AlgorithmOutput {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    let instance = Arc::new(builder.build().unwrap());
    let mut solution = Solution::new(instance);
    if cost > 0 {
        solution.add(0);
    }
    AlgorithmOutput {
        solution,
        bound,
        time: 1.5,
        intermediary_outputs: vec![IntermediaryOutput { cost, bound, time: 0.5 }],
    }
}

#[test]
fn from_output_computes_both_optimality_gaps() {
    let output = sample_output(5, 3);
    let report = SolutionReport::from_output(&output);
    assert_eq!(report.solution.cost, 5);
    assert_eq!(report.bound, 3);
    assert_eq!(report.absolute_optimality_gap, 2);
    assert!((report.relative_optimality_gap - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn relative_gap_is_zero_when_bound_is_zero() {
    let output = sample_output(0, 0);
    let report = SolutionReport::from_output(&output);
    assert_eq!(report.relative_optimality_gap, 0.0);
}

#[test]
fn report_serializes_with_the_documented_field_names() {
    let output = sample_output(2, 2);
    let report = Report::new(serde_json::json!({"Seed": 0})).with_algorithm("greedy", &output);
    let json = report.to_json_string_pretty().unwrap();
    assert!(json.contains("\"Parameters\""));
    assert!(json.contains("\"greedy\""));
    assert!(json.contains("\"Solution\""));
    assert!(json.contains("\"Cost\""));
    assert!(json.contains("\"Bound\""));
    assert!(json.contains("\"AbsoluteOptimalityGap\""));
    assert!(json.contains("\"RelativeOptimalityGap\""));
    assert!(json.contains("\"IntermediaryOutputs\""));
}

#[test]
fn report_supports_multiple_algorithm_entries() {
    let a = sample_output(5, 3);
    let b = sample_output(4, 3);
    let report = Report::new(serde_json::json!({}))
        .with_algorithm("greedy", &a)
        .with_algorithm("local-search-row-weighting-1", &b);
    assert_eq!(report.algorithms.len(), 2);
    assert!(report.algorithms.contains_key("greedy"));
    assert!(report.algorithms.contains_key("local-search-row-weighting-1"));
}
