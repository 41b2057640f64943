use super::*;
use crate::instance::InstanceBuilder;

fn triangle_instance() -> Arc<Instance> {
    // A={0,1}, B={1,2}, C={0,2}, unit costs: the spec §8 scenario 1
    // instance, optimum cost 2 (any two sets).
    let mut builder = InstanceBuilder::new();
    builder.add_elements(3);
    builder.add_sets(3);
    builder.set_cost(0, 1);
    builder.set_cost(1, 1);
    builder.set_cost(2, 1);
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 1);
    builder.add_arc(1, 2);
    builder.add_arc(2, 0);
    builder.add_arc(2, 2);
    Arc::new(builder.build().unwrap())
}

#[test]
fn empty_solution_is_infeasible_and_free() {
    let instance = triangle_instance();
    let solution = Solution::new(instance);
    assert_eq!(solution.cost(), 0);
    assert!(!solution.feasible());
    assert_eq!(solution.number_of_sets(), 0);
}

#[test]
fn add_updates_cover_count_cost_and_feasibility() {
    let instance = triangle_instance();
    let mut solution = Solution::new(instance);
    solution.add(0);
    assert!(solution.contains(0));
    assert_eq!(solution.cover_count(0), 1);
    assert_eq!(solution.cover_count(1), 1);
    assert_eq!(solution.cover_count(2), 0);
    assert_eq!(solution.cost(), 1);
    assert!(!solution.feasible());

    solution.add(1);
    assert_eq!(solution.cover_count(1), 2);
    assert!(!solution.feasible()); // element 2 still uncovered

    solution.add(2);
    assert!(solution.feasible());
    assert_eq!(solution.cost(), 3);
}

#[test]
fn remove_is_the_exact_inverse_of_add() {
    let instance = triangle_instance();
    let mut solution = Solution::new(instance);
    solution.add(0);
    solution.add(1);
    solution.remove(0);
    assert!(!solution.contains(0));
    assert_eq!(solution.cover_count(0), 0);
    assert_eq!(solution.cover_count(1), 1);
    assert_eq!(solution.cost(), 1);
}

#[test]
#[should_panic(expected = "already in the solution")]
fn double_add_panics() {
    let instance = triangle_instance();
    let mut solution = Solution::new(instance);
    solution.add(0);
    solution.add(0);
}

#[test]
#[should_panic(expected = "is not in the solution")]
fn remove_of_absent_set_panics() {
    let instance = triangle_instance();
    let mut solution = Solution::new(instance);
    solution.remove(0);
}

#[test]
fn component_bookkeeping_tracks_cost_and_coverage_per_component() {
    let instance = triangle_instance();
    let mut solution = Solution::new(Arc::clone(&instance));
    assert_eq!(instance.number_of_components(), 1);
    solution.add(0);
    assert_eq!(solution.component_cost(0), 1);
    assert_eq!(solution.component_covered_elements(0), 2);
}

#[test]
fn copy_from_mirrors_another_solution_without_recreating_it() {
    let instance = triangle_instance();
    let mut source = Solution::new(Arc::clone(&instance));
    source.add(0);
    source.add(1);

    let mut target = Solution::new(Arc::clone(&instance));
    target.add(2);
    target.copy_from(&source);

    assert_eq!(target.sets().len(), source.sets().len());
    assert!(target.contains(0) && target.contains(1) && !target.contains(2));
    assert_eq!(target.cost(), source.cost());
}
