//! Greedy constructors (spec §4.6): fast, deterministic heuristics used
//! both as standalone `--algorithm` values and as seeds for the local
//! search and LNS.

use std::sync::Arc;

use ordered_float::OrderedFloat;

use crate::containers::IndexedHeap;
use crate::instance::Instance;
use crate::solution::Solution;
use crate::types::{Cost, ElementId, SetId};

type Ratio = OrderedFloat<f64>;

fn ratio_key(marginal: f64, cost: Cost) -> Ratio {
    // Negated so the smallest key (the heap's root) is the best ratio.
    OrderedFloat(-marginal / cost.max(1) as f64)
}

/// Shared driver for [`greedy`]/[`greedy_lin`]: repeatedly pick the
/// not-yet-chosen set maximising `marginal(s) / cost(s)`, where
/// `marginal` sums `weight(e)` over `s`'s currently uncovered elements.
/// Only the sets sharing a just-newly-covered element with the chosen
/// set need their key refreshed, per [`IndexedHeap`]'s contract.
fn weighted_greedy<F>(instance: &Arc<Instance>, weight: F) -> Solution
where
    F: Fn(&Instance, ElementId) -> f64,
{
    let mut solution = Solution::new(Arc::clone(instance));
    let number_of_sets = instance.number_of_sets();
    let marginal_of = |solution: &Solution, set_id: SetId| -> f64 {
        instance
            .set(set_id)
            .elements
            .iter()
            .filter(|&&e| !solution.covers(e))
            .map(|&e| weight(instance, e))
            .sum()
    };

    let mut heap: IndexedHeap<Ratio> = IndexedHeap::new(number_of_sets);
    for set_id in 0..number_of_sets {
        let marginal = marginal_of(&solution, set_id);
        heap.push(set_id, ratio_key(marginal, instance.set(set_id).cost));
    }

    while !solution.feasible() {
        let Some((set_id, _)) = heap.pop() else {
            break;
        };
        solution.add(set_id);

        let mut touched = Vec::new();
        for &element_id in &instance.set(set_id).elements {
            if solution.cover_count(element_id) == 1 {
                for &neighbour in &instance.element(element_id).sets {
                    if heap.contains(neighbour) {
                        touched.push(neighbour);
                    }
                }
            }
        }
        touched.sort_unstable();
        touched.dedup();
        for t in touched {
            let marginal = marginal_of(&solution, t);
            heap.update(t, ratio_key(marginal, instance.set(t).cost));
        }
    }
    solution
}

/// Repeatedly choose the set maximising `(uncovered elements covered) /
/// cost`.
pub fn greedy(instance: &Arc<Instance>) -> Solution {
    weighted_greedy(instance, |_, _| 1.0)
}

/// Like [`greedy`], but each uncovered element contributes
/// `1 / |element.sets|` instead of `1`, favouring sets that cover
/// elements with few remaining alternatives.
pub fn greedy_lin(instance: &Arc<Instance>) -> Solution {
    weighted_greedy(instance, |instance, element_id| {
        1.0 / instance.element(element_id).sets.len() as f64
    })
}

/// For each uncovered element in ID order, add the best-ratio candidate
/// covering it.
pub fn greedy_dual(instance: &Arc<Instance>) -> Solution {
    let mut solution = Solution::new(Arc::clone(instance));
    for element_id in 0..instance.number_of_elements() {
        if solution.covers(element_id) {
            continue;
        }
        let best = instance
            .element(element_id)
            .sets
            .iter()
            .filter(|&&s| !solution.contains(s))
            .max_by_key(|&&s| {
                let marginal = instance
                    .set(s)
                    .elements
                    .iter()
                    .filter(|&&e| !solution.covers(e))
                    .count();
                OrderedFloat(marginal as f64 / instance.set(s).cost.max(1) as f64)
            })
            .copied();
        if let Some(set_id) = best {
            solution.add(set_id);
        }
    }
    solution
}

fn reverse_key(instance: &Instance, solution: &Solution, set_id: SetId) -> Ratio {
    let score: f64 = instance
        .set(set_id)
        .elements
        .iter()
        .map(|&e| 1.0 / solution.cover_count(e) as f64)
        .sum();
    OrderedFloat(-score / instance.set(set_id).cost.max(1) as f64)
}

/// Start from the full solution and repeatedly remove the set maximising
/// `Σ 1/cover_count(e) / cost`, stopping once no remaining in-solution
/// set can be removed without uncovering an element.
///
/// A set's removal is "safe" iff every element it covers currently has
/// `cover_count >= 2`. Safety is monotonically lost as neighbours are
/// removed (cover counts only shrink here), never regained, so each set
/// drops out of the candidate heap at most once.
pub fn greedy_reverse(instance: &Arc<Instance>) -> Solution {
    let mut solution = Solution::new(Arc::clone(instance));
    let number_of_sets = instance.number_of_sets();
    for set_id in 0..number_of_sets {
        solution.add(set_id);
    }

    let mut unsafe_count = vec![0u32; number_of_sets];
    for set_id in 0..number_of_sets {
        unsafe_count[set_id] = instance
            .set(set_id)
            .elements
            .iter()
            .filter(|&&e| solution.cover_count(e) < 2)
            .count() as u32;
    }

    let mut heap: IndexedHeap<Ratio> = IndexedHeap::new(number_of_sets);
    for set_id in 0..number_of_sets {
        if unsafe_count[set_id] == 0 {
            heap.push(set_id, reverse_key(instance, &solution, set_id));
        }
    }

    while let Some((set_id, _)) = heap.pop() {
        solution.remove(set_id);

        let mut touched = Vec::new();
        for &element_id in &instance.set(set_id).elements {
            let cover_count = solution.cover_count(element_id);
            for &neighbour in &instance.element(element_id).sets {
                if neighbour == set_id || !solution.contains(neighbour) {
                    continue;
                }
                if cover_count == 1 {
                    if unsafe_count[neighbour] == 0 {
                        heap.remove(neighbour);
                    }
                    unsafe_count[neighbour] += 1;
                } else {
                    touched.push(neighbour);
                }
            }
        }
        touched.sort_unstable();
        touched.dedup();
        for t in touched {
            if unsafe_count[t] == 0 {
                heap.update(t, reverse_key(instance, &solution, t));
            }
        }
    }
    solution
}

/// Start from the full solution and remove sets, in a single ascending
/// pass by the static key `cost / (|elements| + 1)`, whenever doing so is
/// currently safe. Unlike [`greedy_reverse`] the ranking never changes at
/// runtime, so no heap is needed.
pub fn greedy_gwmin(instance: &Arc<Instance>) -> Solution {
    let mut solution = Solution::new(Arc::clone(instance));
    let number_of_sets = instance.number_of_sets();
    for set_id in 0..number_of_sets {
        solution.add(set_id);
    }

    let mut order: Vec<SetId> = (0..number_of_sets).collect();
    order.sort_by_key(|&set_id| {
        let set = instance.set(set_id);
        OrderedFloat(set.cost as f64 / (set.elements.len() as f64 + 1.0))
    });

    for set_id in order {
        let safe = instance
            .set(set_id)
            .elements
            .iter()
            .all(|&e| solution.cover_count(e) >= 2);
        if safe {
            solution.remove(set_id);
        }
    }
    solution
}

/// Run [`greedy`] and [`greedy_reverse`] and keep whichever is cheaper.
pub fn greedy_or_greedy_reverse(instance: &Arc<Instance>) -> Solution {
    let forward = greedy(instance);
    let reverse = greedy_reverse(instance);
    if reverse.cost() <= forward.cost() {
        reverse
    } else {
        forward
    }
}

#[cfg(test)]
#[path = "../tests_unit/algorithms/greedy.rs"]
mod tests;
