//! End-to-end scenarios from spec.md §8.

use std::sync::Arc;

use setcover::algorithms::bounds::trivial_bound;
use setcover::algorithms::formatter::AlgorithmParameters;
use setcover::algorithms::greedy::greedy;
use setcover::algorithms::row_weighting::local_search_row_weighting;
use setcover::instance::InstanceBuilder;
use setcover::reduction::{Reduction, ReductionParameters};
use setcover::timer::Timer;
use setcover::Solution;

/// Scenario 1: a triangle {A={0,1}, B={1,2}, C={0,2}}, unit costs. Any
/// two sets cover the universe; the unique optimum cost is 2.
#[test]
fn triangle_instance_optimum_is_two() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 1);
    builder.add_arc(1, 2);
    builder.add_arc(2, 0);
    builder.add_arc(2, 2);
    let instance = Arc::new(builder.build().unwrap());

    let solution = greedy(&instance);
    assert!(solution.feasible());
    assert_eq!(solution.cost(), 2);
}

/// Scenario 2: M=4, N=3, set0={0,1} set1={2,3} set2={0,1,2,3}, costs
/// {1,1,3}. Optimum is {set0,set1} at cost 2; greedy picks the big set
/// first (ties by ID, and set2 covers the most elements per cost up
/// front) then must still reach a feasible cover; local search must
/// descend to cost 2 within a modest iteration budget.
#[test]
fn four_element_instance_local_search_descends_to_optimum() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 2);
    builder.add_arc(1, 3);
    builder.add_arc(2, 0);
    builder.add_arc(2, 1);
    builder.add_arc(2, 2);
    builder.add_arc(2, 3);
    builder.set_cost(0, 1);
    builder.set_cost(1, 1);
    builder.set_cost(2, 3);
    let instance = Arc::new(builder.build().unwrap());

    let initial = greedy(&instance);
    assert!(initial.feasible());

    let parameters = AlgorithmParameters {
        maximum_number_of_iterations: Some(1_000),
        ..Default::default()
    };
    let output = local_search_row_weighting(Arc::clone(&instance), initial, true, parameters);
    assert!(output.solution.feasible());
    assert_eq!(output.solution.cost(), 2);
}

/// Scenario 3: a chain of 10 elements, each covered by exactly one set:
/// mandatory-sets reduction eliminates everything, and `extra_cost`
/// equals the sum of all ten set costs.
#[test]
fn chain_instance_reduces_to_nothing() {
    let mut builder = InstanceBuilder::new();
    let mut total_cost = 0;
    for i in 0..10 {
        builder.add_arc(i, i);
        builder.set_cost(i, (i as i64) + 1);
        total_cost += (i as i64) + 1;
    }
    let instance = Arc::new(builder.build().unwrap());

    let reduction = Reduction::new(Arc::clone(&instance), &ReductionParameters::default(), &Timer::unbounded());
    assert_eq!(reduction.instance().number_of_sets(), 0);
    assert_eq!(reduction.instance().number_of_elements(), 0);
    assert_eq!(reduction.unreduction().extra_cost(), total_cost);
}

/// Scenario 4: 100 identical sets covering {0,1,2,3}; 99 at cost 5, one
/// at cost 3. Reduction removes the 99 duplicates; the unreduced
/// optimum is the single cheap set, cost 3.
#[test]
fn fully_identical_sets_keep_only_the_cheapest() {
    let mut builder = InstanceBuilder::new();
    for set_id in 0..100 {
        for element_id in 0..4 {
            builder.add_arc(set_id, element_id);
        }
        builder.set_cost(set_id, if set_id == 42 { 3 } else { 5 });
    }
    let instance = Arc::new(builder.build().unwrap());

    // Identical-sets dedup first collapses the 100 sets down to the
    // single cheapest one; with only one set left covering all four
    // elements, every element now has degree 1, so mandatory-sets
    // reduction (which runs first each round) fixes that set in on the
    // next round, leaving an empty reduced instance.
    let reduction = Reduction::new(Arc::clone(&instance), &ReductionParameters::default(), &Timer::unbounded());
    assert_eq!(reduction.instance().number_of_sets(), 0);
    assert_eq!(reduction.instance().number_of_elements(), 0);
    assert_eq!(reduction.unreduction().extra_cost(), 3);

    let lifted = reduction.unreduction().lift(Arc::clone(&instance), &Solution::new(Arc::new(reduction.instance().clone())));
    assert!(lifted.feasible());
    assert_eq!(lifted.cost(), 3);
}

/// Scenario 5: two independent size-10 components, each solvable in
/// isolation by the small-component rule; the total optimum is the sum
/// of the per-component optima.
#[test]
fn disconnected_components_reduce_and_sum_independently() {
    let mut builder = InstanceBuilder::new();
    // Component A: a 10-cycle of elements covered by 10 size-2 sets
    // (set i covers {i, (i+1)%10}), unit cost: optimum is a perfect
    // matching of 5 sets.
    for i in 0..10 {
        builder.add_arc(i, i);
        builder.add_arc(i, (i + 1) % 10);
        builder.set_cost(i, 1);
    }
    // Component B: the same shape, offset into a disjoint element/set
    // range so it shares nothing with component A.
    for i in 0..10 {
        builder.add_arc(10 + i, 10 + i);
        builder.add_arc(10 + i, 10 + (i + 1) % 10);
        builder.set_cost(10 + i, 1);
    }
    let instance = Arc::new(builder.build().unwrap());
    assert_eq!(instance.number_of_components(), 2);

    // Each 10-cycle fits comfortably under the small-component brute
    // force cap (10 sets <= the default 16), so reduction alone solves
    // both to optimality and leaves nothing behind.
    let reduction = Reduction::new(Arc::clone(&instance), &ReductionParameters::default(), &Timer::unbounded());
    assert_eq!(reduction.instance().number_of_sets(), 0);
    assert_eq!(reduction.instance().number_of_elements(), 0);
    // A 10-cycle's minimum set cover (size-2 sets) is a perfect
    // matching of 5 sets; the two independent cycles sum to 10.
    assert_eq!(reduction.unreduction().extra_cost(), 10);
}

/// Scenario 6 (abridged): a small unicost vertex-cover-as-set-cover
/// instance where local search must match the known optimum well
/// within its iteration budget.
#[test]
fn unicost_vertex_cover_instance_matches_known_optimum() {
    // Path graph on 6 vertices (5 edges): minimum vertex cover size 3
    // (e.g. vertices 1, 3, 5 cover every edge of a path 0-1-2-3-4-5).
    let edges = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)];
    let mut builder = InstanceBuilder::new();
    // One set per vertex, one element per edge; a vertex-set covers
    // every edge incident to it.
    for vertex in 0..6 {
        builder.set_cost(vertex, 1);
    }
    for (edge_id, &(u, v)) in edges.iter().enumerate() {
        builder.add_arc(u, edge_id);
        builder.add_arc(v, edge_id);
    }
    let instance = Arc::new(builder.build().unwrap());

    let initial = greedy(&instance);
    let parameters = AlgorithmParameters {
        maximum_number_of_iterations: Some(5_000),
        ..Default::default()
    };
    let output = local_search_row_weighting(Arc::clone(&instance), initial, true, parameters);
    assert!(output.solution.feasible());
    assert_eq!(output.solution.cost(), 3);
    assert!(trivial_bound(&instance) <= 3);
}
