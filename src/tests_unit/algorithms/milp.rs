use super::*;
use crate::instance::InstanceBuilder;

fn triangle() -> Arc<Instance> {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 1);
    builder.add_arc(1, 2);
    builder.add_arc(2, 0);
    builder.add_arc(2, 2);
    Arc::new(builder.build().unwrap())
}

#[test]
fn gurobi_backend_is_always_unavailable() {
    let instance = triangle();
    let result = solve(Arc::clone(&instance), MilpBackend::Gurobi, AlgorithmParameters::default());
    assert_eq!(result.status, MilpStatus::Unavailable);
    assert_eq!(result.output.solution.cost(), 0);
}

#[test]
fn empty_instance_is_solved_trivially() {
    let instance = Arc::new(InstanceBuilder::new().build().unwrap());
    let result = solve(Arc::clone(&instance), MilpBackend::Gurobi, AlgorithmParameters::default());
    assert_eq!(result.status, MilpStatus::Optimal);
    assert_eq!(result.output.solution.cost(), 0);
}

#[cfg(feature = "milp-highs")]
#[test]
fn highs_backend_finds_the_triangle_optimum() {
    let instance = triangle();
    let result = solve(Arc::clone(&instance), MilpBackend::Highs, AlgorithmParameters::default());
    assert_eq!(result.status, MilpStatus::Optimal);
    assert!(result.output.solution.feasible());
    assert_eq!(result.output.solution.cost(), 2);
}

#[cfg(not(feature = "milp-coin-cbc"))]
#[test]
fn coin_cbc_backend_reports_unavailable_when_not_compiled_in() {
    let instance = triangle();
    let result = solve(Arc::clone(&instance), MilpBackend::CoinCbc, AlgorithmParameters::default());
    assert_eq!(result.status, MilpStatus::Unavailable);
}
