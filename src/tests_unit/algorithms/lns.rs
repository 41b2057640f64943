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

fn bounded_parameters(max_iterations: Counter) -> AlgorithmParameters {
    AlgorithmParameters {
        timer: Timer::unbounded(),
        maximum_number_of_iterations: Some(max_iterations),
        ..Default::default()
    }
}

#[test]
fn search_never_returns_a_solution_worse_than_the_seed() {
    let instance = triangle();
    let initial = greedy(&instance);
    let seed_cost = initial.cost();
    let output = large_neighborhood_search(Arc::clone(&instance), initial, bounded_parameters(20), 1);
    assert!(output.solution.feasible());
    assert!(output.solution.cost() <= seed_cost);
}

#[test]
fn search_finds_the_triangle_optimum() {
    let instance = triangle();
    let mut full = Solution::new(Arc::clone(&instance));
    full.add(0);
    full.add(1);
    full.add(2);
    let output = large_neighborhood_search(Arc::clone(&instance), full, bounded_parameters(50), 1);
    assert_eq!(output.solution.cost(), 2);
}

#[test]
fn search_stops_as_soon_as_the_goal_is_reached() {
    let instance = triangle();
    let initial = greedy(&instance);
    let mut parameters = bounded_parameters(1000);
    parameters.goal = Some(2);
    let output = large_neighborhood_search(Arc::clone(&instance), initial, parameters, 1);
    assert_eq!(output.solution.cost(), 2);
}

#[test]
fn empty_instance_returns_immediately() {
    let instance = Arc::new(InstanceBuilder::new().build().unwrap());
    let initial = Solution::new(Arc::clone(&instance));
    let output = large_neighborhood_search(Arc::clone(&instance), initial, bounded_parameters(10), 1);
    assert_eq!(output.solution.cost(), 0);
    assert!(output.solution.feasible());
}

#[test]
fn reported_bound_matches_the_trivial_bound() {
    let instance = triangle();
    let initial = greedy(&instance);
    let output = large_neighborhood_search(Arc::clone(&instance), initial, bounded_parameters(5), 1);
    assert_eq!(output.bound, trivial_bound(&instance));
}
