use super::*;
use crate::instance::InstanceBuilder;
use crate::timer::Timer;

fn chain_instance() -> Arc<Instance> {
    // Sets {0,1}, {1,2}, {0,1,2}: the cheap global set dominates and
    // reduction should converge to a single mandatory set.
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 1);
    builder.add_arc(1, 2);
    builder.add_arc(2, 0);
    builder.add_arc(2, 1);
    builder.add_arc(2, 2);
    builder.set_cost(0, 5);
    builder.set_cost(1, 5);
    builder.set_cost(2, 1);
    Arc::new(builder.build().unwrap())
}

#[test]
fn disabled_reduction_returns_identity_map() {
    let instance = chain_instance();
    let parameters = ReductionParameters {
        reduce: false,
        ..Default::default()
    };
    let timer = Timer::unbounded();
    let reduction = Reduction::new(Arc::clone(&instance), &parameters, &timer);
    assert_eq!(reduction.instance().number_of_sets(), instance.number_of_sets());
    assert_eq!(reduction.unreduction().extra_cost(), 0);
}

#[test]
fn reduction_preserves_feasibility_and_cost_on_lift() {
    let instance = chain_instance();
    let parameters = ReductionParameters::default();
    let timer = Timer::unbounded();
    let reduction = Reduction::new(Arc::clone(&instance), &parameters, &timer);

    // The reduced instance should be solvable by taking every live set.
    let mut reduced_solution = crate::solution::Solution::new(Arc::new(reduction.instance().clone()));
    for set_id in 0..reduction.instance().number_of_sets() {
        reduced_solution.add(set_id);
    }
    assert!(reduced_solution.feasible());

    let lifted = reduction.unreduction().lift(Arc::clone(&instance), &reduced_solution);
    assert!(lifted.feasible());
    assert_eq!(
        lifted.cost(),
        reduced_solution.cost() + reduction.unreduction().extra_cost()
    );
}

#[test]
fn reduction_never_increases_the_optimum_lower_bound() {
    let instance = chain_instance();
    let parameters = ReductionParameters::default();
    let timer = Timer::unbounded();
    let reduction = Reduction::new(Arc::clone(&instance), &parameters, &timer);
    // Taking every remaining set is feasible and an upper bound on the
    // reduced optimum; lifting it must not exceed the original's total cost.
    let mut all = crate::solution::Solution::new(Arc::new(reduction.instance().clone()));
    for set_id in 0..reduction.instance().number_of_sets() {
        all.add(set_id);
    }
    let lifted = reduction.unreduction().lift(Arc::clone(&instance), &all);
    assert!(lifted.cost() <= instance.total_cost());
}

#[test]
fn set_folding_preserves_the_true_optimum_on_a_three_way_shared_element() {
    // e=0, a=1, b=2; s1={e,a} (set 0), s2={e,b} (set 1), s3={a,b} (set 2),
    // all cost 1. True optimum is 2 (any two of the three sets): s1 alone
    // with folding's old, unsound degree-2-element precondition would
    // merge s1/s2 on `e` and reduce s3 to a lone mandatory set, lifting to
    // a cost-1 solution that leaves `e` uncovered. Every feasible solution
    // of the reduced instance must still lift to a feasible solution of
    // cost >= 2.
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0); // s1 covers e
    builder.add_arc(0, 1); // s1 covers a
    builder.add_arc(1, 0); // s2 covers e
    builder.add_arc(1, 2); // s2 covers b
    builder.add_arc(2, 1); // s3 covers a
    builder.add_arc(2, 2); // s3 covers b
    let instance = Arc::new(builder.build().unwrap());
    let parameters = ReductionParameters::default();
    let timer = Timer::unbounded();
    let reduction = Reduction::new(Arc::clone(&instance), &parameters, &timer);

    let number_of_sets = reduction.instance().number_of_sets();
    assert!(number_of_sets <= 32);
    let mut best: Option<crate::types::Cost> = None;
    for mask in 0..(1u32 << number_of_sets) {
        let mut solution = crate::solution::Solution::new(Arc::new(reduction.instance().clone()));
        for set_id in 0..number_of_sets {
            if mask & (1 << set_id) != 0 {
                solution.add(set_id);
            }
        }
        if !solution.feasible() {
            continue;
        }
        let lifted = reduction.unreduction().lift(Arc::clone(&instance), &solution);
        assert!(lifted.feasible());
        let cost = lifted.cost();
        best = Some(best.map_or(cost, |b| b.min(cost)));
    }
    assert_eq!(best, Some(2));
}

#[test]
fn running_reduction_twice_on_the_reduced_instance_is_idempotent() {
    let instance = chain_instance();
    let parameters = ReductionParameters::default();
    let timer = Timer::unbounded();
    let reduction = Reduction::new(Arc::clone(&instance), &parameters, &timer);
    let once_more = Reduction::new(Arc::new(reduction.instance().clone()), &parameters, &timer);
    assert_eq!(
        once_more.instance().number_of_sets(),
        reduction.instance().number_of_sets()
    );
}
