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
fn identity_map_lifts_a_solution_unchanged() {
    let instance = triangle();
    let map = UnreductionMap::identity(&instance);
    assert_eq!(map.extra_cost(), 0);
    assert!(map.mandatory_sets().is_empty());

    let mut reduced = Solution::new(Arc::clone(&instance));
    reduced.add(0);
    reduced.add(1);

    let lifted = map.lift(Arc::clone(&instance), &reduced);
    assert!(lifted.contains(0) && lifted.contains(1) && !lifted.contains(2));
    assert_eq!(lifted.cost(), reduced.cost());
}

#[test]
fn mandatory_sets_are_always_added_regardless_of_selection() {
    let instance = triangle();
    let operations = vec![
        UnreductionOperations::default(),
        UnreductionOperations::default(),
        UnreductionOperations::default(),
    ];
    let map = UnreductionMap::new(operations, vec![2], 1);

    let empty_reduced = Solution::new(Arc::clone(&instance));
    let lifted = map.lift(Arc::clone(&instance), &empty_reduced);
    assert!(lifted.contains(2));
    assert_eq!(lifted.cost(), 1);
}

#[test]
fn in_out_lists_fire_according_to_reduced_membership() {
    let instance = triangle();
    let operations = vec![
        UnreductionOperations {
            in_sets: vec![0, 1],
            out_sets: vec![2],
        },
        UnreductionOperations::default(),
        UnreductionOperations::default(),
    ];
    let map = UnreductionMap::new(operations, Vec::new(), 0);

    let mut chosen = Solution::new(Arc::clone(&instance));
    chosen.add(0);
    let lifted_chosen = map.lift(Arc::clone(&instance), &chosen);
    assert!(lifted_chosen.contains(0) && lifted_chosen.contains(1));
    assert!(!lifted_chosen.contains(2));

    let not_chosen = Solution::new(Arc::clone(&instance));
    let lifted_not_chosen = map.lift(Arc::clone(&instance), &not_chosen);
    assert!(lifted_not_chosen.contains(2));
    assert!(!lifted_not_chosen.contains(0) && !lifted_not_chosen.contains(1));
}

#[test]
fn lift_bound_adds_extra_cost() {
    let instance = triangle();
    let map = UnreductionMap::new(
        vec![UnreductionOperations::default(); instance.number_of_sets()],
        Vec::new(),
        4,
    );
    assert_eq!(map.lift_bound(10), 14);
}

#[test]
fn duplicate_set_ids_across_lists_are_added_only_once() {
    let instance = triangle();
    let operations = vec![
        UnreductionOperations {
            in_sets: vec![0],
            out_sets: Vec::new(),
        },
        UnreductionOperations {
            in_sets: vec![0],
            out_sets: Vec::new(),
        },
        UnreductionOperations::default(),
    ];
    let map = UnreductionMap::new(operations, vec![0], 0);
    let mut reduced = Solution::new(Arc::clone(&instance));
    reduced.add(0);
    reduced.add(1);
    let lifted = map.lift(Arc::clone(&instance), &reduced);
    assert_eq!(lifted.number_of_sets(), 1);
    assert_eq!(lifted.cost(), 1);
}
