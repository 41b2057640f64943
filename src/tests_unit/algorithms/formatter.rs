use super::*;
use crate::instance::InstanceBuilder;
use std::sync::{Arc as StdArc, Mutex as StdMutex};

fn triangle() -> StdArc<crate::instance::Instance> {
    let mut builder = InstanceBuilder::new();
    builder.add_arc(0, 0);
    builder.add_arc(0, 1);
    builder.add_arc(1, 1);
    builder.add_arc(1, 2);
    builder.add_arc(2, 0);
    builder.add_arc(2, 2);
    StdArc::new(builder.build().unwrap())
}

#[test]
fn update_rejects_non_improving_candidates() {
    let instance = triangle();
    let mut initial = Solution::new(StdArc::clone(&instance));
    initial.add(0);
    initial.add(1);
    initial.add(2);
    let parameters = AlgorithmParameters::default();
    let formatter = AlgorithmFormatter::new(initial, &parameters);
    assert_eq!(formatter.best_cost(), 3);

    let mut same_cost = Solution::new(StdArc::clone(&instance));
    same_cost.add(0);
    same_cost.add(2);
    same_cost.add(1);
    assert!(!formatter.update(&same_cost, 0));
    assert_eq!(formatter.best_cost(), 3);
}

#[test]
fn update_accepts_strict_improvements_and_records_them() {
    let instance = triangle();
    let mut initial = Solution::new(StdArc::clone(&instance));
    initial.add(0);
    initial.add(1);
    initial.add(2);
    let parameters = AlgorithmParameters::default();
    let formatter = AlgorithmFormatter::new(initial, &parameters);

    let mut better = Solution::new(StdArc::clone(&instance));
    better.add(0);
    better.add(1);
    assert!(formatter.update(&better, 2));
    assert_eq!(formatter.best_cost(), 2);

    let output = formatter.finish(2);
    assert_eq!(output.solution.cost(), 2);
    assert_eq!(output.intermediary_outputs.len(), 1);
    assert_eq!(output.intermediary_outputs[0].cost, 2);
}

#[test]
fn goal_reached_compares_against_best_cost() {
    let instance = triangle();
    let mut initial = Solution::new(StdArc::clone(&instance));
    initial.add(0);
    initial.add(1);
    let parameters = AlgorithmParameters::default();
    let formatter = AlgorithmFormatter::new(initial, &parameters);
    assert!(!formatter.goal_reached(Some(1)));
    assert!(formatter.goal_reached(Some(2)));
    assert!(!formatter.goal_reached(None));
}

#[test]
fn new_solution_callback_fires_on_every_improvement() {
    let instance = triangle();
    let mut initial = Solution::new(StdArc::clone(&instance));
    initial.add(0);
    initial.add(1);
    initial.add(2);

    let calls = StdArc::new(StdMutex::new(0usize));
    let calls_clone = StdArc::clone(&calls);
    let mut parameters = AlgorithmParameters::default();
    parameters.new_solution_callback = Some(StdArc::new(move |_solution, _cost, _time| {
        *calls_clone.lock().unwrap() += 1;
    }));
    let formatter = AlgorithmFormatter::new(initial, &parameters);

    let mut better = Solution::new(StdArc::clone(&instance));
    better.add(0);
    better.add(1);
    formatter.update(&better, 2);

    assert_eq!(*calls.lock().unwrap(), 1);
}
