use super::*;
use crate::instance::InstanceBuilder;
use std::sync::Arc;

#[test]
fn mandatory_sets_fix_the_sole_cover_of_a_degree_one_element() {
    // Element 0 is covered only by set 0; set 1 covers elements 1 and 2.
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(1, 1);
    builder.add_arc(1, 2);
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);

    assert!(reduce_mandatory_sets(&mut ri));
    assert!(ri.is_set_removed(0));
    assert!(ri.is_element_removed(0));
}

#[test]
fn dominated_singletons_removes_a_singleton_set_dominated_by_a_cheaper_set() {
    // Set 0 covers only element 0 (cost 5); set 1 also covers element 0
    // (plus element 1) at cost 1, so set 0 is a dominated singleton.
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(1, 0);
    builder.add_arc(1, 1);
    builder.set_cost(0, 5);
    builder.set_cost(1, 1);
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);

    assert!(reduce_dominated_singletons(&mut ri));
    assert!(ri.is_set_removed(0));
    assert!(!ri.is_set_removed(1));
    assert!(!ri.is_element_removed(0));
}

#[test]
fn dominated_singletons_keeps_a_strictly_cheaper_singleton() {
    // Set 0 covers only element 0 at cost 1, cheaper than the other set
    // covering element 0: it must not be removed.
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(1, 0);
    builder.add_arc(1, 1);
    builder.set_cost(0, 1);
    builder.set_cost(1, 5);
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);

    assert!(!reduce_dominated_singletons(&mut ri));
    assert!(!ri.is_set_removed(0));
}

#[test]
fn dominated_sets_2_removes_the_more_expensive_superset() {
    // Element 0 is covered by set 0 ({0}) and set 1 ({0,1}), cost(1) <= cost(0).
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(1, 0);
    builder.add_arc(1, 1);
    builder.set_cost(0, 5);
    builder.set_cost(1, 1);
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);

    assert!(reduce_dominated_sets_2(&mut ri));
    assert!(ri.is_set_removed(0));
    assert!(!ri.is_set_removed(1));
}

#[test]
fn dominated_elements_2_drops_the_redundant_element() {
    // Set 0 covers elements 0 and 1; element 1 is also covered by set 1,
    // so element 1's coverage is a superset of element 0's: element 0 is
    // redundant (every set covering it also covers element 1... set here
    // up so the domination direction is unambiguous).
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 1);
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);

    assert!(reduce_dominated_elements_2(&mut ri));
    // One of the two degree-2-set-anchored elements should be removed.
    assert!(ri.is_element_removed(0) || ri.is_element_removed(1));
}

#[test]
fn identical_sets_keeps_only_the_cheapest() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 0);
    builder.add_arc(1, 1);
    builder.set_cost(0, 10);
    builder.set_cost(1, 3);
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);

    assert!(reduce_identical_sets(&mut ri));
    assert!(ri.is_set_removed(0));
    assert!(!ri.is_set_removed(1));
}

#[test]
fn identical_elements_keeps_only_one_representative() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);

    assert!(reduce_identical_elements(&mut ri));
    assert!(ri.is_element_removed(0) ^ ri.is_element_removed(1));
}

#[test]
fn set_folding_merges_an_aggregate_set_with_its_two_neighbours() {
    // v = {x,y} (set 0), n1 = {x,p} (set 1), n2 = {y,q} (set 2), all cost 1.
    // v's two elements are together covered only by v, n1 and n2; neither
    // neighbour alone covers v, and each reaches outside it.
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 0);
    builder.add_arc(1, 2);
    builder.add_arc(2, 1);
    builder.add_arc(2, 3);
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);

    assert!(reduce_set_folding(&mut ri));
    assert!(ri.is_set_removed(1));
    assert!(ri.is_set_removed(2));
    assert!(!ri.is_set_removed(0));
    // Set 0 is now the aggregate covering {2, 3} at its original cost 1.
    assert_eq!(ri.set_cost(0), 1);
    let remaining: std::collections::HashSet<_> = ri.set_elements(0).collect();
    assert_eq!(remaining, [2usize, 3].into_iter().collect());
    assert!(ri.is_element_removed(0));
    assert!(ri.is_element_removed(1));
}

#[test]
fn set_folding_does_not_fire_when_a_set_has_only_one_neighbour() {
    // Sets {0,1} and {1,2}, both cost 1, sharing only element 1: set 0's
    // elements are touched by a single neighbour (set 1), not exactly two,
    // so the rule-3 precondition does not hold and folding must not fire.
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 1);
    builder.add_arc(1, 2);
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);

    assert!(!reduce_set_folding(&mut ri));
}

#[test]
fn twin_merges_two_sets_sharing_the_same_three_neighbours() {
    // v1={a,b,c} (set 0), v2={d,e,f} (set 1) each touch exactly the same
    // three neighbours n1,n2,n3 (sets 2,3,4), one element apiece, so no
    // pair of neighbours alone covers either v1 or v2; all five sets cost 1.
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0); // v1-a
    builder.add_arc(0, 1); // v1-b
    builder.add_arc(0, 2); // v1-c
    builder.add_arc(1, 3); // v2-d
    builder.add_arc(1, 4); // v2-e
    builder.add_arc(1, 5); // v2-f
    builder.add_arc(2, 0); // n1-a
    builder.add_arc(2, 3); // n1-d
    builder.add_arc(2, 6); // n1-g
    builder.add_arc(3, 1); // n2-b
    builder.add_arc(3, 4); // n2-e
    builder.add_arc(3, 7); // n2-h
    builder.add_arc(4, 2); // n3-c
    builder.add_arc(4, 5); // n3-f
    builder.add_arc(4, 8); // n3-i
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);

    assert!(reduce_twin(&mut ri));
    assert!(ri.is_set_removed(1));
    assert!(ri.is_set_removed(2));
    assert!(ri.is_set_removed(3));
    assert!(ri.is_set_removed(4));
    assert!(!ri.is_set_removed(0));
    assert_eq!(ri.set_cost(0), 1);
    let remaining: std::collections::HashSet<_> = ri.set_elements(0).collect();
    assert_eq!(remaining, [6usize, 7, 8].into_iter().collect());
}

#[test]
fn twin_does_not_fire_without_exactly_three_neighbours() {
    // Set 0 = {0,1} has only one neighbour (set 1, via element 1): twin
    // requires exactly three, so it must not fire.
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 1);
    builder.add_arc(1, 2);
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);

    assert!(!reduce_twin(&mut ri));
}

#[test]
fn unconfined_sets_drops_a_set_whose_witness_cover_is_no_more_expensive() {
    // Set 0 = {0}, cost 5; set 1 = {0,1}, cost 1, covers the same ground
    // plus more at lower cost: set 0 is unconfined.
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(1, 0);
    builder.add_arc(1, 1);
    builder.set_cost(0, 5);
    builder.set_cost(1, 1);
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);

    assert!(reduce_unconfined_sets(&mut ri));
    assert!(ri.is_set_removed(0));
}

#[test]
fn small_components_are_solved_to_optimality() {
    // Triangle: A={0,1}, B={1,2}, C={0,2}, unit costs; optimum is any two
    // sets, cost 2.
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 1);
    builder.add_arc(1, 2);
    builder.add_arc(2, 0);
    builder.add_arc(2, 2);
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);

    assert!(reduce_small_components(&mut ri, 16));
    let fixed_in = (0..3).filter(|&s| ri.is_set_removed(s)).count();
    assert_eq!(fixed_in, 3); // every set in the component gets fixed in or out
}

#[test]
fn small_components_skip_a_component_with_more_than_64_elements() {
    // 17 sets chained by shared link elements, each also covering 4
    // private elements: one connected component, within the set-count
    // budget, but with more than 64 total elements. brute_force_cover's
    // u64 bitmask cannot represent that many elements, so the component
    // must be skipped rather than overflow the mask.
    let number_of_sets = 17;
    let mut builder = InstanceBuilder::new();
    let mut link = vec![0usize; number_of_sets];
    let mut next_element = 0usize;
    for slot in link.iter_mut().skip(1) {
        *slot = next_element;
        next_element += 1;
    }
    for set_id in 0..number_of_sets {
        if set_id > 0 {
            builder.add_arc(set_id, link[set_id]);
        }
        if set_id + 1 < number_of_sets {
            builder.add_arc(set_id, link[set_id + 1]);
        }
        for _ in 0..4 {
            builder.add_arc(set_id, next_element);
            next_element += 1;
        }
    }
    assert!(next_element > 64);
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);

    assert!(!reduce_small_components(&mut ri, 20));
    assert!((0..number_of_sets).all(|s| !ri.is_set_removed(s)));
}

#[test]
fn crown_removes_a_set_with_an_exclusive_cheap_witness_per_element() {
    // Set 0 = {0,1}, cost 10. Element 0 has an exclusive cheap witness
    // (set 1 = {0}, cost 1); element 1 has an exclusive cheap witness
    // (set 2 = {1}, cost 2). The witnesses are distinct and sum to 3,
    // cheaper than set 0: set 0 is dominated by the pair.
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 0);
    builder.add_arc(2, 1);
    builder.set_cost(0, 10);
    builder.set_cost(1, 1);
    builder.set_cost(2, 2);
    let instance = Arc::new(builder.build().unwrap());
    let mut ri = ReductionInstance::from_instance(instance);
    let mut rng = crate::rng::from_seed(1);

    assert!(reduce_crown(&mut ri, &mut rng, 8));
    assert!(ri.is_set_removed(0));
}

#[test]
fn crown_sampling_is_deterministic_given_a_seed() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 0);
    builder.add_arc(2, 1);
    builder.set_cost(0, 10);
    builder.set_cost(1, 1);
    builder.set_cost(2, 2);
    let instance = Arc::new(builder.build().unwrap());

    let mut ri_a = ReductionInstance::from_instance(Arc::clone(&instance));
    let mut ri_b = ReductionInstance::from_instance(Arc::clone(&instance));
    let mut rng_a = crate::rng::from_seed(7);
    let mut rng_b = crate::rng::from_seed(7);

    let changed_a = reduce_crown(&mut ri_a, &mut rng_a, 8);
    let changed_b = reduce_crown(&mut ri_b, &mut rng_b, 8);
    assert_eq!(changed_a, changed_b);
    assert_eq!(ri_a.is_set_removed(0), ri_b.is_set_removed(0));
}

#[test]
fn dominated_sets_sampling_is_deterministic_given_a_seed() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(1, 0);
    builder.add_arc(1, 1);
    builder.set_cost(0, 5);
    builder.set_cost(1, 1);
    let instance = Arc::new(builder.build().unwrap());

    let mut ri_a = ReductionInstance::from_instance(Arc::clone(&instance));
    let mut ri_b = ReductionInstance::from_instance(Arc::clone(&instance));
    let mut rng_a = crate::rng::from_seed(42);
    let mut rng_b = crate::rng::from_seed(42);

    let changed_a = reduce_dominated_sets(&mut ri_a, &mut rng_a, 8);
    let changed_b = reduce_dominated_sets(&mut ri_b, &mut rng_b, 8);
    assert_eq!(changed_a, changed_b);
    assert_eq!(ri_a.is_set_removed(0), ri_b.is_set_removed(0));
}
