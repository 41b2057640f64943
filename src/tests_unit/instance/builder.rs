use super::*;

#[test]
fn build_fails_on_uncovered_element() {
    let mut builder = InstanceBuilder::new();
    builder.add_elements(2);
    builder.add_arc(0, 0);
    // element 1 is never covered by any set.
    let err = builder.build().unwrap_err();
    match err {
        SetCoverError::UncoveredElement { element } => assert_eq!(element, 1),
        other => panic!("expected UncoveredElement, got {other:?}"),
    }
}

#[test]
fn set_cost_grows_the_instance() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.set_cost(3, 7);
    let instance = builder.build().unwrap();
    // set 3 covers nothing, so it belongs to no component, but it exists
    // and carries the cost it was given.
    assert_eq!(instance.number_of_sets(), 4);
    assert_eq!(instance.set(3).cost, 7);
    assert_eq!(instance.set(3).component, None);
}

#[test]
fn default_set_cost_is_one() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    let instance = builder.build().unwrap();
    assert_eq!(instance.set(0).cost, 1);
}

#[test]
fn explicit_cost_overrides_default() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.set_cost(0, 42);
    let instance = builder.build().unwrap();
    assert_eq!(instance.set(0).cost, 42);
    assert_eq!(instance.total_cost(), 42);
}

#[test]
fn arcs_are_counted_once_per_insertion() {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 0);
    let instance = builder.build().unwrap();
    assert_eq!(instance.number_of_arcs(), 3);
}
