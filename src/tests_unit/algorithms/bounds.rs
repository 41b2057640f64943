use super::*;
use crate::instance::InstanceBuilder;

#[test]
fn trivial_bound_on_triangle_is_a_lower_bound() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 1);
    builder.add_arc(1, 2);
    builder.add_arc(2, 0);
    builder.add_arc(2, 2);
    let instance = builder.build().unwrap();
    // Optimum is 2 (any two of the three sets); the fractional ratio bound
    // must not exceed it.
    assert!(trivial_bound(&instance) <= 2);
    assert!(trivial_bound(&instance) >= 1);
}

#[test]
fn trivial_bound_of_empty_instance_is_zero() {
    let instance = InstanceBuilder::new().build().unwrap();
    assert_eq!(trivial_bound(&instance), 0);
}

#[test]
fn trivial_bound_single_set_covers_everything_exactly() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.set_cost(0, 6);
    let instance = builder.build().unwrap();
    assert_eq!(trivial_bound(&instance), 6);
}

#[test]
fn clique_cover_bound_on_triangle_finds_the_shared_clique() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 1);
    builder.add_arc(1, 2);
    builder.add_arc(2, 0);
    builder.add_arc(2, 2);
    let instance = builder.build().unwrap();
    // Every element here has degree 2, so all three sets form one 2-cover
    // clique; the bound sums all but the most expensive set.
    assert!(clique_cover_bound(&instance) <= 2);
}

#[test]
fn clique_cover_bound_is_zero_with_no_degree_two_elements() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(1, 1);
    let instance = builder.build().unwrap();
    assert_eq!(clique_cover_bound(&instance), 0);
}
