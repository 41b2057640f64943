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

fn chain_with_dominant_set() -> Arc<Instance> {
    // A global set covering everything cheaply (including element 3,
    // which no other set reaches), plus two overlapping but individually
    // pricier sets: every greedy variant should prefer the global set,
    // and it can never be safely removed by the reverse-deletion pass.
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(0, 2);
    builder.add_arc(0, 3);
    builder.add_arc(1, 0);
    builder.add_arc(1, 1);
    builder.add_arc(2, 1);
    builder.add_arc(2, 2);
    builder.set_cost(0, 1);
    builder.set_cost(1, 10);
    builder.set_cost(2, 10);
    Arc::new(builder.build().unwrap())
}

#[test]
fn greedy_produces_a_feasible_solution() {
    let instance = triangle();
    let solution = greedy(&instance);
    assert!(solution.feasible());
}

#[test]
fn greedy_lin_produces_a_feasible_solution() {
    let instance = triangle();
    let solution = greedy_lin(&instance);
    assert!(solution.feasible());
}

#[test]
fn greedy_dual_produces_a_feasible_solution() {
    let instance = triangle();
    let solution = greedy_dual(&instance);
    assert!(solution.feasible());
}

#[test]
fn greedy_reverse_produces_a_feasible_solution() {
    let instance = triangle();
    let solution = greedy_reverse(&instance);
    assert!(solution.feasible());
}

#[test]
fn greedy_gwmin_produces_a_feasible_solution() {
    let instance = triangle();
    let solution = greedy_gwmin(&instance);
    assert!(solution.feasible());
}

#[test]
fn greedy_picks_the_cheap_dominant_set_first() {
    let instance = chain_with_dominant_set();
    let solution = greedy(&instance);
    assert!(solution.contains(0));
}

#[test]
fn greedy_reverse_keeps_the_cheap_dominant_set() {
    let instance = chain_with_dominant_set();
    let solution = greedy_reverse(&instance);
    assert!(solution.feasible());
    assert!(solution.contains(0));
}

#[test]
fn greedy_or_greedy_reverse_is_never_worse_than_either_alone() {
    let instance = chain_with_dominant_set();
    let forward = greedy(&instance);
    let reverse = greedy_reverse(&instance);
    let combined = greedy_or_greedy_reverse(&instance);
    assert!(combined.feasible());
    assert!(combined.cost() <= forward.cost());
    assert!(combined.cost() <= reverse.cost());
}

#[test]
fn all_greedy_variants_agree_on_the_unique_triangle_optimum_cost() {
    let instance = triangle();
    // Optimal cost on the unit-cost triangle is 2 (any two sets).
    assert_eq!(greedy(&instance).cost(), 2);
    assert_eq!(greedy_lin(&instance).cost(), 2);
    assert_eq!(greedy_dual(&instance).cost(), 2);
    assert_eq!(greedy_reverse(&instance).cost(), 2);
    assert_eq!(greedy_gwmin(&instance).cost(), 2);
}
