use super::*;
use crate::instance::InstanceBuilder;

fn triangle() -> Instance {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 1);
    builder.add_arc(1, 2);
    builder.add_arc(2, 0);
    builder.add_arc(2, 2);
    builder.build().unwrap()
}

#[test]
fn counts_and_totals_are_derived_correctly() {
    let instance = triangle();
    assert_eq!(instance.number_of_elements(), 3);
    assert_eq!(instance.number_of_sets(), 3);
    assert_eq!(instance.number_of_arcs(), 6);
    assert_eq!(instance.total_cost(), 3);
    assert_eq!(instance.number_of_components(), 1);
}

#[test]
fn bidirectional_incidence_holds() {
    let instance = triangle();
    for (set_id, set) in instance.sets().iter().enumerate() {
        for &element_id in &set.elements {
            assert!(instance.element(element_id).sets.contains(&set_id));
        }
    }
    for (element_id, element) in instance.elements().iter().enumerate() {
        for &set_id in &element.sets {
            assert!(instance.set(set_id).elements.contains(&element_id));
        }
    }
}

#[test]
fn set_neighbours_excludes_self_and_is_memoised() {
    let instance = triangle();
    let neighbours = instance.set_neighbours(0).to_vec();
    assert!(!neighbours.contains(&0));
    assert_eq!(neighbours.len(), 2);
    // Second call hits the OnceLock cache; result must stay stable.
    assert_eq!(instance.set_neighbours(0), neighbours.as_slice());
}

#[test]
fn element_neighbours_excludes_self() {
    let instance = triangle();
    let neighbours = instance.element_neighbours(0);
    assert!(!neighbours.contains(&0));
    assert_eq!(neighbours.len(), 2);
}

#[test]
fn element_set_neighbours_includes_covering_sets() {
    let instance = triangle();
    let neighbours = instance.element_set_neighbours(0);
    // Element 0 is covered by sets 0 and 2; the union should contain both.
    assert!(neighbours.contains(&0));
    assert!(neighbours.contains(&2));
}

#[test]
fn precompute_with_multiple_threads_matches_serial() {
    let instance = triangle();
    instance.precompute_set_neighbours(4);
    for set_id in 0..instance.number_of_sets() {
        let multi = instance.set_neighbours(set_id).to_vec();
        assert!(multi.len() <= instance.number_of_sets() - 1);
    }
}

#[test]
fn disconnected_instance_has_two_components() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(1, 1);
    let instance = builder.build().unwrap();
    assert_eq!(instance.number_of_components(), 2);
    assert_ne!(instance.element(0).component, instance.element(1).component);
}

#[test]
fn isolated_set_with_no_elements_belongs_to_no_component() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_sets(2); // set 1 covers nothing
    let instance = builder.build().unwrap();
    assert_eq!(instance.set(1).component, None);
}
