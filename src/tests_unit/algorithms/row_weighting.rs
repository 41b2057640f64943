use super::*;
use crate::algorithms::greedy::greedy;
use crate::instance::InstanceBuilder;
use crate::timer::Timer;

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

fn disconnected_instance() -> Arc<Instance> {
    // Two separate triangles, components 0 and 1, so partitioning by
    // component is meaningfully different from a single pool.
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 1);
    builder.add_arc(1, 2);
    builder.add_arc(2, 0);
    builder.add_arc(2, 2);
    builder.add_arc(3, 3);
    builder.add_arc(3, 4);
    builder.add_arc(4, 4);
    builder.add_arc(4, 5);
    builder.add_arc(5, 3);
    builder.add_arc(5, 5);
    Arc::new(builder.build().unwrap())
}

fn bounded_parameters(max_iterations: Counter) -> AlgorithmParameters {
    AlgorithmParameters {
        timer: Timer::unbounded(),
        maximum_number_of_iterations: Some(max_iterations),
        ..Default::default()
    }
}

#[test]
fn search_finds_the_triangle_optimum_unpartitioned() {
    let instance = triangle();
    let initial = greedy(&instance);
    let output = local_search_row_weighting(Arc::clone(&instance), initial, false, bounded_parameters(200));
    assert!(output.solution.feasible());
    assert_eq!(output.solution.cost(), 2);
}

#[test]
fn search_finds_the_triangle_optimum_partitioned_by_component() {
    let instance = triangle();
    let initial = greedy(&instance);
    let output = local_search_row_weighting(Arc::clone(&instance), initial, true, bounded_parameters(200));
    assert!(output.solution.feasible());
    assert_eq!(output.solution.cost(), 2);
}

#[test]
fn search_handles_disconnected_components_independently() {
    let instance = disconnected_instance();
    let initial = greedy(&instance);
    let output = local_search_row_weighting(Arc::clone(&instance), initial, true, bounded_parameters(400));
    assert!(output.solution.feasible());
    assert_eq!(output.solution.cost(), 4); // two triangles, cost 2 apiece
}

#[test]
fn reported_bound_is_always_zero() {
    let instance = triangle();
    let initial = greedy(&instance);
    let output = local_search_row_weighting(Arc::clone(&instance), initial, false, bounded_parameters(10));
    assert_eq!(output.bound, 0);
}

#[test]
fn empty_instance_returns_immediately() {
    let instance = Arc::new(InstanceBuilder::new().build().unwrap());
    let initial = Solution::new(Arc::clone(&instance));
    let output = local_search_row_weighting(Arc::clone(&instance), initial, false, bounded_parameters(10));
    assert_eq!(output.solution.cost(), 0);
}

#[test]
fn search_stops_once_goal_cost_is_reached() {
    let instance = triangle();
    let initial = greedy(&instance);
    let mut parameters = bounded_parameters(1000);
    parameters.goal = Some(2);
    let output = local_search_row_weighting(Arc::clone(&instance), initial, false, parameters);
    assert_eq!(output.solution.cost(), 2);
}
