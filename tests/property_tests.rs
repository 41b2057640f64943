//! Property-based tests for the invariants of spec.md §8.
//!
//! These cover the `Instance`/`Solution` bidirectional-incidence and
//! incremental-coverage invariants, and the reduction engine's
//! round-trip/lower-bound relationship, over randomly generated
//! instances.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use setcover::algorithms::greedy::greedy;
use setcover::instance::InstanceBuilder;
use setcover::reduction::{Reduction, ReductionParameters};
use setcover::timer::Timer;
use setcover::Instance;

/// A random set-cover instance: `n_elements` elements, `n_sets` sets,
/// each element assigned to at least one random set so the builder never
/// rejects it, plus a random positive cost per set.
fn instance_strategy(max_elements: usize, max_sets: usize) -> impl Strategy<Value = Instance> {
    (2..=max_elements, 2..=max_sets).prop_flat_map(|(n_elements, n_sets)| {
        let owners = prop::collection::vec(0..n_sets, n_elements);
        let extra_arcs = prop::collection::vec((0..n_sets, 0..n_elements), 0..n_sets * 2);
        let costs = prop::collection::vec(1..20i64, n_sets);
        (Just(n_elements), Just(n_sets), owners, extra_arcs, costs).prop_map(
            |(n_elements, n_sets, owners, extra_arcs, costs)| {
                let mut builder = InstanceBuilder::new();
                builder.add_sets(n_sets);
                builder.add_elements(n_elements);
                let mut arcs: HashSet<(usize, usize)> = HashSet::new();
                for (element_id, &set_id) in owners.iter().enumerate() {
                    arcs.insert((set_id, element_id));
                }
                for (set_id, element_id) in extra_arcs {
                    arcs.insert((set_id, element_id));
                }
                for &(set_id, element_id) in &arcs {
                    builder.add_arc(set_id, element_id);
                }
                for (set_id, &cost) in costs.iter().enumerate() {
                    builder.set_cost(set_id, cost);
                }
                builder.build().expect("every element was given an owning set")
            },
        )
    })
}

proptest! {
    /// Bidirectional incidence: an element lists a set iff that set lists
    /// the element.
    #[test]
    fn incidence_is_bidirectional(instance in instance_strategy(12, 10)) {
        for set_id in 0..instance.number_of_sets() {
            for &element_id in &instance.set(set_id).elements {
                prop_assert!(instance.element(element_id).sets.contains(&set_id));
            }
        }
        for element_id in 0..instance.number_of_elements() {
            for &set_id in &instance.element(element_id).sets {
                prop_assert!(instance.set(set_id).elements.contains(&element_id));
            }
        }
    }

    /// `number_of_arcs` agrees from both directions, and `total_cost` is
    /// the sum of every set's cost.
    #[test]
    fn arc_and_cost_totals_agree(instance in instance_strategy(12, 10)) {
        let from_sets: usize = (0..instance.number_of_sets()).map(|s| instance.set(s).elements.len()).sum();
        let from_elements: usize = (0..instance.number_of_elements()).map(|e| instance.element(e).sets.len()).sum();
        prop_assert_eq!(from_sets, from_elements);
        prop_assert_eq!(instance.number_of_arcs(), from_sets);

        let total: i64 = (0..instance.number_of_sets()).map(|s| instance.set(s).cost).sum();
        prop_assert_eq!(instance.total_cost(), total);
    }

    /// Greedy always returns a feasible solution whose cost matches the
    /// sum of its chosen sets' costs.
    #[test]
    fn greedy_is_feasible_and_cost_is_additive(instance in instance_strategy(14, 10)) {
        let instance = Arc::new(instance);
        let solution = greedy(&instance);
        prop_assert!(solution.feasible());

        let expected: i64 = solution.sets().iter().map(|&s| instance.set(s).cost).sum();
        prop_assert_eq!(solution.cost(), expected);

        for element_id in 0..instance.number_of_elements() {
            let expected_count = solution
                .sets()
                .iter()
                .filter(|&&s| instance.set(s).elements.contains(&element_id))
                .count() as u32;
            prop_assert_eq!(solution.cover_count(element_id), expected_count);
        }
    }

    /// Reduction round-trip: lifting a feasible solution of the reduced
    /// instance back through the unreduction map yields a feasible
    /// solution of the original instance, at the expected cost.
    #[test]
    fn reduction_round_trip_preserves_feasibility_and_cost(instance in instance_strategy(16, 12)) {
        let original = Arc::new(instance);
        let parameters = ReductionParameters {
            seed: 7,
            ..Default::default()
        };
        let reduction = Reduction::new(Arc::clone(&original), &parameters, &Timer::unbounded());
        let reduced = Arc::new(reduction.instance().clone());

        let reduced_solution = greedy(&reduced);
        prop_assert!(reduced_solution.feasible());

        let lifted = reduction.unreduction().lift(Arc::clone(&original), &reduced_solution);
        prop_assert!(lifted.feasible());
        prop_assert_eq!(
            lifted.cost(),
            reduced_solution.cost() + reduction.unreduction().extra_cost()
        );
    }

    /// Running reduction twice in a row (unbounded round cap) is a no-op
    /// the second time: the reduced instance's set/element counts stop
    /// shrinking once a fixed point is reached.
    #[test]
    fn reduction_reaches_a_fixed_point(instance in instance_strategy(16, 12)) {
        let original = Arc::new(instance);
        let parameters = ReductionParameters {
            seed: 11,
            ..Default::default()
        };
        let once = Reduction::new(Arc::clone(&original), &parameters, &Timer::unbounded());
        let reduced_once = Arc::new(once.instance().clone());

        let twice = Reduction::new(Arc::clone(&reduced_once), &parameters, &Timer::unbounded());
        prop_assert_eq!(twice.instance().number_of_sets(), reduced_once.number_of_sets());
        prop_assert_eq!(twice.instance().number_of_elements(), reduced_once.number_of_elements());
        prop_assert_eq!(twice.unreduction().extra_cost(), 0);
    }
}
