use super::*;

#[test]
fn sub_seed_is_deterministic_and_distinct() {
    // sanity: Seed/Cost/Penalty are just integer aliases; exercised via rng.rs
    let a: Cost = 5;
    let b: Penalty = 5;
    assert_eq!(a, b);
}
