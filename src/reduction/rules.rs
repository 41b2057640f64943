//! The eight reduction rules applied by the engine each round (spec §4.3).
//!
//! Every rule takes the mutable [`ReductionInstance`] and returns whether
//! it changed anything; the engine in [`super`] keeps re-running the
//! whole suite until a round changes nothing or the round budget is
//! spent. Each rule is a standalone correctness-preserving rewrite:
//! fixing a set's membership, merging two decision variables into one,
//! or dropping a set/element whose constraint is implied elsewhere.
//!
//! `reduce_dominated_sets`/`reduce_dominated_elements` are the expensive,
//! randomly sampled general-domination checks; they only run when
//! [`super::ReductionParameters::enable_dominated_sets`]/
//! [`super::ReductionParameters::enable_dominated_elements`] is set,
//! mirroring the upstream solver's own default of leaving them off on
//! large instances. The `_2`-suffixed variants are cheap special cases
//! anchored on degree-2 elements/sets and always run.

use std::collections::HashMap;
use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;

use super::working::ReductionInstance;
use crate::types::{Cost, ElementId, SetId};

/// Force every set that is the sole cover of some element.
///
/// Re-scans its own worklist as it goes (an already-queued element can be
/// consumed by a neighbour's fix before its own turn, or a just-fixed
/// set can cover more than one originally degree-1 element at once); the
/// cross-rule transitivity spec §4.3 describes (e.g. a set dropped by
/// [`reduce_dominated_singletons`] exposing a new degree-1 element) is
/// reached by the engine re-running the whole rule suite every round
/// rather than within a single call.
pub(crate) fn reduce_mandatory_sets(ri: &mut ReductionInstance) -> bool {
    let mut changed = false;
    let mut queue: Vec<ElementId> = (0..ri.number_of_elements())
        .filter(|&e| !ri.is_element_removed(e) && ri.element_degree(e) == 1)
        .collect();
    while let Some(element_id) = queue.pop() {
        if ri.is_element_removed(element_id) || ri.element_degree(element_id) != 1 {
            continue;
        }
        let set_id = ri.element_sets(element_id).next().unwrap();
        ri.fix_in(set_id);
        changed = true;
    }
    changed
}

/// Drop every singleton set (covering exactly one live element) whose
/// element is also covered, at no greater cost, by another live set
/// (spec §4.3 rule 1's second clause).
pub(crate) fn reduce_dominated_singletons(ri: &mut ReductionInstance) -> bool {
    let mut changed = false;
    let candidates: Vec<SetId> = (0..ri.number_of_sets())
        .filter(|&s| !ri.is_set_removed(s) && ri.set_degree(s) == 1)
        .collect();
    for set_id in candidates {
        if ri.is_set_removed(set_id) || ri.set_degree(set_id) != 1 {
            continue;
        }
        let element_id = ri.set_elements(set_id).next().unwrap();
        let cost = ri.set_cost(set_id);
        let dominated = ri
            .element_sets(element_id)
            .any(|other| other != set_id && ri.set_cost(other) <= cost);
        if dominated {
            ri.fix_out(set_id);
            changed = true;
        }
    }
    changed
}

/// Drop sets dominated, with no extra cost, by the union of two other
/// sets discovered through a shared degree-2 element.
pub(crate) fn reduce_dominated_sets_2(ri: &mut ReductionInstance) -> bool {
    let mut changed = false;
    let candidate_elements: Vec<ElementId> = (0..ri.number_of_elements())
        .filter(|&e| !ri.is_element_removed(e) && ri.element_degree(e) == 2)
        .collect();
    for element_id in candidate_elements {
        if ri.is_element_removed(element_id) || ri.element_degree(element_id) != 2 {
            continue;
        }
        let pair: Vec<SetId> = ri.element_sets(element_id).collect();
        let (a, b) = (pair[0], pair[1]);
        let elements_a: HashSet<ElementId> = ri.set_elements(a).collect();
        let elements_b: HashSet<ElementId> = ri.set_elements(b).collect();
        if elements_a.is_subset(&elements_b) && ri.set_cost(a) >= ri.set_cost(b) {
            ri.fix_out(a);
            changed = true;
        } else if elements_b.is_subset(&elements_a) && ri.set_cost(b) >= ri.set_cost(a) {
            ri.fix_out(b);
            changed = true;
        }
    }
    changed
}

/// Drop elements whose coverage is implied by another element, discovered
/// through a shared degree-2 set.
pub(crate) fn reduce_dominated_elements_2(ri: &mut ReductionInstance) -> bool {
    let mut changed = false;
    let candidate_sets: Vec<SetId> = (0..ri.number_of_sets())
        .filter(|&s| !ri.is_set_removed(s) && ri.set_degree(s) == 2)
        .collect();
    for set_id in candidate_sets {
        if ri.is_set_removed(set_id) || ri.set_degree(set_id) != 2 {
            continue;
        }
        let pair: Vec<ElementId> = ri.set_elements(set_id).collect();
        let (x, y) = (pair[0], pair[1]);
        let sets_x: HashSet<SetId> = ri.element_sets(x).collect();
        let sets_y: HashSet<SetId> = ri.element_sets(y).collect();
        if sets_x.is_subset(&sets_y) {
            ri.remove_element(y);
            changed = true;
        } else if sets_y.is_subset(&sets_x) {
            ri.remove_element(x);
            changed = true;
        }
    }
    changed
}

/// Expensive general domination check: a randomly sampled set is removed
/// if some other live set covers everything it covers for no more cost.
pub(crate) fn reduce_dominated_sets(
    ri: &mut ReductionInstance,
    rng: &mut StdRng,
    sample_size: usize,
) -> bool {
    let mut changed = false;
    let live: Vec<SetId> = (0..ri.number_of_sets())
        .filter(|&s| !ri.is_set_removed(s))
        .collect();
    if live.is_empty() {
        return false;
    }
    for _ in 0..sample_size.min(live.len()) {
        let set_id = live[rng.random_range(0..live.len())];
        if ri.is_set_removed(set_id) {
            continue;
        }
        let elements: Vec<ElementId> = ri.set_elements(set_id).collect();
        if elements.is_empty() {
            continue;
        }
        let mut neighbours: HashSet<SetId> = HashSet::new();
        for &element_id in &elements {
            for other in ri.element_sets(element_id) {
                if other != set_id {
                    neighbours.insert(other);
                }
            }
        }
        let cost = ri.set_cost(set_id);
        for other in neighbours {
            if ri.set_cost(other) > cost {
                continue;
            }
            let other_elements: HashSet<ElementId> = ri.set_elements(other).collect();
            if elements.iter().all(|e| other_elements.contains(e)) {
                ri.fix_out(set_id);
                changed = true;
                break;
            }
        }
    }
    changed
}

/// Expensive general domination check for elements, symmetric to
/// [`reduce_dominated_sets`].
pub(crate) fn reduce_dominated_elements(
    ri: &mut ReductionInstance,
    rng: &mut StdRng,
    sample_size: usize,
) -> bool {
    let mut changed = false;
    let live: Vec<ElementId> = (0..ri.number_of_elements())
        .filter(|&e| !ri.is_element_removed(e))
        .collect();
    if live.is_empty() {
        return false;
    }
    for _ in 0..sample_size.min(live.len()) {
        let element_id = live[rng.random_range(0..live.len())];
        if ri.is_element_removed(element_id) {
            continue;
        }
        let covering_sets: HashSet<SetId> = ri.element_sets(element_id).collect();
        if covering_sets.is_empty() {
            continue;
        }
        let mut neighbours: HashSet<ElementId> = HashSet::new();
        for &set_id in &covering_sets {
            for other in ri.set_elements(set_id) {
                if other != element_id {
                    neighbours.insert(other);
                }
            }
        }
        for other in neighbours {
            if ri.is_element_removed(other) {
                continue;
            }
            let other_sets: HashSet<SetId> = ri.element_sets(other).collect();
            if covering_sets.is_subset(&other_sets) {
                ri.remove_element(element_id);
                changed = true;
                break;
            }
        }
    }
    changed
}

/// Merge a set `v` (size ≥ 2) together with the exactly two other sets
/// whose coverage of `v`'s elements together exhausts them into a single
/// aggregate set (spec §4.3 rule 3).
///
/// `v` qualifies only when every element it covers is touched by no set
/// other than `v`, `v1`, and `v2` (discovered by unioning the neighbour
/// sets of every element of `v` and bailing out the moment a third
/// neighbour appears); `v`, `v1`, and `v2` share one cost; neither `v1`
/// nor `v2` alone covers all of `v`'s elements; and each of `v1`, `v2`
/// covers at least one element outside `v`. Under those conditions any
/// optimal solution either takes `v` alone or takes both `v1` and `v2`
/// (taking just one of `v1`/`v2` is always dominated by swapping in `v`,
/// and taking `v` together with either neighbour is dominated by dropping
/// `v`), so choosing the aggregate in the reduced instance stands for
/// `{v1, v2}` and not choosing it stands for `{v}`. `v`'s own elements are
/// then fully implied regardless of which way the reduced instance goes
/// and are dropped; `v` keeps its cost and becomes the new aggregate,
/// covering `v1.elements ∪ v2.elements` minus `v`'s own former elements.
pub(crate) fn reduce_set_folding(ri: &mut ReductionInstance) -> bool {
    let mut changed = false;
    let mut used: HashSet<SetId> = HashSet::new();
    let mut folds: Vec<(SetId, SetId, SetId)> = Vec::new();

    for set_id in 0..ri.number_of_sets() {
        if ri.is_set_removed(set_id) || used.contains(&set_id) {
            continue;
        }
        let Some((n1, n2)) = fold_neighbours(ri, set_id) else {
            continue;
        };
        if used.contains(&n1) || used.contains(&n2) {
            continue;
        }
        if !fold_precondition_holds(ri, set_id, n1, n2) {
            continue;
        }
        used.insert(set_id);
        used.insert(n1);
        used.insert(n2);
        folds.push((set_id, n1, n2));
    }

    for (set_id, n1, n2) in folds {
        apply_fold(ri, set_id, n1, n2);
        changed = true;
    }
    changed
}

/// The live sets (other than `set_id`) touching any element of `set_id`,
/// or `None` if `set_id` has fewer than 2 elements or more than two such
/// neighbours.
fn fold_neighbours(ri: &ReductionInstance, set_id: SetId) -> Option<(SetId, SetId)> {
    let elements: Vec<ElementId> = ri.set_elements(set_id).collect();
    if elements.len() < 2 {
        return None;
    }
    let mut neighbours: HashSet<SetId> = HashSet::new();
    for element_id in elements {
        for other in ri.element_sets(element_id) {
            if other == set_id {
                continue;
            }
            neighbours.insert(other);
            if neighbours.len() > 2 {
                return None;
            }
        }
    }
    if neighbours.len() != 2 {
        return None;
    }
    let mut it = neighbours.into_iter();
    Some((it.next().unwrap(), it.next().unwrap()))
}

/// Shared precondition check for [`reduce_set_folding`] and [`reduce_twin`]:
/// equal costs, neither neighbour alone covers all of `set_id`, each
/// neighbour reaches outside `set_id`, and together they cover exactly
/// `set_id`'s elements.
fn fold_precondition_holds(ri: &ReductionInstance, set_id: SetId, n1: SetId, n2: SetId) -> bool {
    let cost = ri.set_cost(set_id);
    if ri.set_cost(n1) != cost || ri.set_cost(n2) != cost {
        return false;
    }
    let v_elements: HashSet<ElementId> = ri.set_elements(set_id).collect();
    let n1_elements: Vec<ElementId> = ri.set_elements(n1).collect();
    let n2_elements: Vec<ElementId> = ri.set_elements(n2).collect();

    let n1_in_v: HashSet<ElementId> = n1_elements
        .iter()
        .copied()
        .filter(|e| v_elements.contains(e))
        .collect();
    let n2_in_v: HashSet<ElementId> = n2_elements
        .iter()
        .copied()
        .filter(|e| v_elements.contains(e))
        .collect();
    if n1_in_v.len() == v_elements.len() || n2_in_v.len() == v_elements.len() {
        return false;
    }
    if !n1_elements.iter().any(|e| !v_elements.contains(e)) {
        return false;
    }
    if !n2_elements.iter().any(|e| !v_elements.contains(e)) {
        return false;
    }
    n1_in_v.union(&n2_in_v).count() == v_elements.len()
}

/// Turn `set_id` into the `{n1, n2}` aggregate: swap its own `in`/`out`
/// lists (not choosing the aggregate now means choosing `set_id`, the
/// opposite of before) and append `n1`'s and `n2`'s lists (choosing it
/// means choosing both), then redefine its coverage and retire `n1`/`n2`.
fn apply_fold(ri: &mut ReductionInstance, set_id: SetId, n1: SetId, n2: SetId) {
    let old_elements: HashSet<ElementId> = ri.set_elements(set_id).collect();
    let mut new_elements: HashSet<ElementId> = ri.set_elements(n1).collect();
    new_elements.extend(ri.set_elements(n2));
    new_elements.retain(|e| !old_elements.contains(e));

    let mut ops = ri.unreduction_ops(set_id).clone();
    std::mem::swap(&mut ops.in_sets, &mut ops.out_sets);
    ops.in_sets.extend(ri.unreduction_ops(n1).in_sets.iter().copied());
    ops.out_sets.extend(ri.unreduction_ops(n1).out_sets.iter().copied());
    ops.in_sets.extend(ri.unreduction_ops(n2).in_sets.iter().copied());
    ops.out_sets.extend(ri.unreduction_ops(n2).out_sets.iter().copied());

    let cost = ri.set_cost(set_id);
    ri.redefine_set(set_id, new_elements.into_iter().collect(), cost);
    ri.set_unreduction_ops(set_id, ops);
    ri.remove_set(n1);
    ri.remove_set(n2);
    for element_id in old_elements {
        ri.remove_element(element_id);
    }
}

/// Merge two sets sharing the exact same set of three neighbours into a
/// single aggregate, generalizing [`reduce_set_folding`] to a pair of
/// sets instead of one (spec §4.3 rule 4).
///
/// `v1` and `v2` each qualify on their own as having exactly three
/// neighbours covering everything they do not cover themselves, with no
/// two of those three neighbours alone sufficient (the same per-set
/// precondition as folding, just against three neighbours instead of
/// two); pairing additionally requires `v1` and `v2` to name the *same*
/// three neighbours and all five sets to share one cost. Taking the
/// aggregate in the reduced instance stands for taking all three
/// neighbours (replacing both `v1` and `v2`); not taking it stands for
/// taking both `v1` and `v2`.
pub(crate) fn reduce_twin(ri: &mut ReductionInstance) -> bool {
    let mut changed = false;
    let mut used: HashSet<SetId> = HashSet::new();
    let mut candidates: HashMap<[SetId; 3], Vec<SetId>> = HashMap::new();

    for set_id in 0..ri.number_of_sets() {
        if ri.is_set_removed(set_id) {
            continue;
        }
        let Some(neighbours) = twin_neighbours(ri, set_id) else {
            continue;
        };
        let elements: HashSet<ElementId> = ri.set_elements(set_id).collect();
        let [n1, n2, n3] = neighbours;
        if pair_covers_all(ri, &elements, n1, n2)
            || pair_covers_all(ri, &elements, n1, n3)
            || pair_covers_all(ri, &elements, n2, n3)
        {
            continue;
        }
        candidates.entry(neighbours).or_default().push(set_id);
    }

    let mut folds: Vec<(SetId, SetId, [SetId; 3])> = Vec::new();
    for (neighbours, mut group) in candidates {
        if group.len() < 2 {
            continue;
        }
        group.sort_unstable();
        let [n1, n2, n3] = neighbours;
        let mut iter = group.into_iter();
        while let Some(v1) = iter.next() {
            let Some(v2) = iter.next() else {
                break;
            };
            if used.contains(&v1)
                || used.contains(&v2)
                || used.contains(&n1)
                || used.contains(&n2)
                || used.contains(&n3)
            {
                continue;
            }
            let cost = ri.set_cost(v1);
            if ri.set_cost(v2) != cost
                || ri.set_cost(n1) != cost
                || ri.set_cost(n2) != cost
                || ri.set_cost(n3) != cost
            {
                continue;
            }
            used.insert(v1);
            used.insert(v2);
            used.insert(n1);
            used.insert(n2);
            used.insert(n3);
            folds.push((v1, v2, neighbours));
        }
    }

    for (v1, v2, neighbours) in folds {
        apply_twin_fold(ri, v1, v2, neighbours);
        changed = true;
    }
    changed
}

/// The live sets (other than `set_id`) touching any element of `set_id`,
/// or `None` unless there are exactly 3 (sorted, for use as a map key).
fn twin_neighbours(ri: &ReductionInstance, set_id: SetId) -> Option<[SetId; 3]> {
    let elements: Vec<ElementId> = ri.set_elements(set_id).collect();
    if elements.is_empty() {
        return None;
    }
    let mut neighbours: HashSet<SetId> = HashSet::new();
    for element_id in elements {
        for other in ri.element_sets(element_id) {
            if other == set_id {
                continue;
            }
            neighbours.insert(other);
            if neighbours.len() > 3 {
                return None;
            }
        }
    }
    if neighbours.len() != 3 {
        return None;
    }
    let mut sorted: Vec<SetId> = neighbours.into_iter().collect();
    sorted.sort_unstable();
    Some([sorted[0], sorted[1], sorted[2]])
}

/// Whether `a` and `b` between them cover all of `v_elements`.
fn pair_covers_all(ri: &ReductionInstance, v_elements: &HashSet<ElementId>, a: SetId, b: SetId) -> bool {
    let mut covered: HashSet<ElementId> = ri.set_elements(a).filter(|e| v_elements.contains(e)).collect();
    covered.extend(ri.set_elements(b).filter(|e| v_elements.contains(e)));
    covered.len() == v_elements.len()
}

/// Turn `v1` into the `{n1, n2, n3}` aggregate: swap its own `in`/`out`
/// lists, append `v2`'s lists swapped (not taking the aggregate now means
/// taking `v2`, the opposite of `v2`'s own convention), and append each
/// neighbour's lists directly (taking the aggregate means taking all
/// three), then redefine coverage and retire `v2`, `n1`, `n2`, `n3`.
fn apply_twin_fold(ri: &mut ReductionInstance, v1: SetId, v2: SetId, neighbours: [SetId; 3]) {
    let [n1, n2, n3] = neighbours;
    let mut old_elements: HashSet<ElementId> = ri.set_elements(v1).collect();
    old_elements.extend(ri.set_elements(v2));

    let mut new_elements: HashSet<ElementId> = ri.set_elements(n1).collect();
    new_elements.extend(ri.set_elements(n2));
    new_elements.extend(ri.set_elements(n3));
    new_elements.retain(|e| !old_elements.contains(e));

    let mut ops = ri.unreduction_ops(v1).clone();
    std::mem::swap(&mut ops.in_sets, &mut ops.out_sets);
    ops.in_sets.extend(ri.unreduction_ops(v2).out_sets.iter().copied());
    ops.out_sets.extend(ri.unreduction_ops(v2).in_sets.iter().copied());
    for n in [n1, n2, n3] {
        ops.in_sets.extend(ri.unreduction_ops(n).in_sets.iter().copied());
        ops.out_sets.extend(ri.unreduction_ops(n).out_sets.iter().copied());
    }

    let cost = ri.set_cost(v1);
    ri.redefine_set(v1, new_elements.into_iter().collect(), cost);
    ri.set_unreduction_ops(v1, ops);
    ri.remove_set(v2);
    ri.remove_set(n1);
    ri.remove_set(n2);
    ri.remove_set(n3);
    for element_id in old_elements {
        ri.remove_element(element_id);
    }
}

fn sorted_hash(values: &[usize]) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    sorted.hash(&mut hasher);
    hasher.finish()
}

/// Drop all but the cheapest of a group of sets covering exactly the same
/// elements.
pub(crate) fn reduce_identical_sets(ri: &mut ReductionInstance) -> bool {
    let mut changed = false;
    let mut buckets: HashMap<u64, Vec<SetId>> = HashMap::new();
    for set_id in 0..ri.number_of_sets() {
        if ri.is_set_removed(set_id) {
            continue;
        }
        let elements: Vec<ElementId> = ri.set_elements(set_id).collect();
        buckets
            .entry(sorted_hash(&elements))
            .or_default()
            .push(set_id);
    }
    for group in buckets.into_values() {
        if group.len() < 2 {
            continue;
        }
        let mut by_elements: HashMap<Vec<ElementId>, Vec<SetId>> = HashMap::new();
        for set_id in group {
            let mut elements: Vec<ElementId> = ri.set_elements(set_id).collect();
            elements.sort_unstable();
            by_elements.entry(elements).or_default().push(set_id);
        }
        for (_, mut twins) in by_elements {
            if twins.len() < 2 {
                continue;
            }
            twins.sort_by_key(|&s| ri.set_cost(s));
            let keep = twins[0];
            for &set_id in &twins[1..] {
                if ri.set_cost(set_id) >= ri.set_cost(keep) {
                    ri.fix_out(set_id);
                    changed = true;
                }
            }
        }
    }
    changed
}

/// Drop all but one of a group of elements covered by exactly the same
/// sets.
pub(crate) fn reduce_identical_elements(ri: &mut ReductionInstance) -> bool {
    let mut changed = false;
    let mut buckets: HashMap<u64, Vec<ElementId>> = HashMap::new();
    for element_id in 0..ri.number_of_elements() {
        if ri.is_element_removed(element_id) {
            continue;
        }
        let sets: Vec<SetId> = ri.element_sets(element_id).collect();
        buckets
            .entry(sorted_hash(&sets))
            .or_default()
            .push(element_id);
    }
    for group in buckets.into_values() {
        if group.len() < 2 {
            continue;
        }
        let mut by_sets: HashMap<Vec<SetId>, Vec<ElementId>> = HashMap::new();
        for element_id in group {
            let mut sets: Vec<SetId> = ri.element_sets(element_id).collect();
            sets.sort_unstable();
            by_sets.entry(sets).or_default().push(element_id);
        }
        for (_, twins) in by_sets {
            if twins.len() < 2 {
                continue;
            }
            for &element_id in &twins[1..] {
                ri.remove_element(element_id);
                changed = true;
            }
        }
    }
    changed
}

/// Drop a set whenever a cheapest-witness cover of its elements, built
/// from other live sets, costs no more than the set itself.
pub(crate) fn reduce_unconfined_sets(ri: &mut ReductionInstance) -> bool {
    let mut changed = false;
    let candidates: Vec<SetId> = (0..ri.number_of_sets())
        .filter(|&s| !ri.is_set_removed(s))
        .collect();
    for set_id in candidates {
        if ri.is_set_removed(set_id) {
            continue;
        }
        let elements: Vec<ElementId> = ri.set_elements(set_id).collect();
        if elements.is_empty() {
            continue;
        }
        let mut witnesses: HashSet<SetId> = HashSet::new();
        let mut feasible = true;
        for &element_id in &elements {
            let mut best: Option<(SetId, Cost)> = None;
            for other in ri.element_sets(element_id) {
                if other == set_id {
                    continue;
                }
                let cost = ri.set_cost(other);
                if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                    best = Some((other, cost));
                }
            }
            match best {
                Some((other, _)) => {
                    witnesses.insert(other);
                }
                None => {
                    feasible = false;
                    break;
                }
            }
        }
        if !feasible {
            continue;
        }
        let witness_cost: Cost = witnesses.iter().map(|&s| ri.set_cost(s)).sum();
        if witness_cost <= ri.set_cost(set_id) {
            ri.fix_out(set_id);
            changed = true;
        }
    }
    changed
}

/// Approximate "crown" reduction (spec §9 Open Questions).
///
/// The upstream solver's `reduce_crown` uses a probabilistic matching
/// heuristic that is not guaranteed safe in all cases; per the Open
/// Questions decision, this implementation does not replicate that
/// permissive behaviour. Instead it samples live sets and, for each,
/// greedily searches for a *system of distinct representatives*: a
/// witness set per covered element, no two elements sharing a witness,
/// at total cost no greater than the sampled set. When one exists the
/// sampled set is dominated by its witnesses and is fixed out. This is
/// sound (a genuine domination witness), but — being a greedy rather
/// than a maximum-bipartite-matching search — can miss a witness
/// system that exists, and the random sampling order makes whether it
/// is found or missed non-deterministic across rounds; hence "crown"
/// and off by default.
pub(crate) fn reduce_crown(ri: &mut ReductionInstance, rng: &mut StdRng, sample_size: usize) -> bool {
    let mut changed = false;
    let live: Vec<SetId> = (0..ri.number_of_sets())
        .filter(|&s| !ri.is_set_removed(s))
        .collect();
    if live.is_empty() {
        return false;
    }
    for _ in 0..sample_size.min(live.len()) {
        let set_id = live[rng.random_range(0..live.len())];
        if ri.is_set_removed(set_id) {
            continue;
        }
        let elements: Vec<ElementId> = ri.set_elements(set_id).collect();
        if elements.is_empty() {
            continue;
        }
        let set_cost = ri.set_cost(set_id);
        let mut used_witnesses: HashSet<SetId> = HashSet::new();
        let mut witness_cost: Cost = 0;
        let mut has_sdr = true;
        for &element_id in &elements {
            let mut candidates: Vec<(Cost, SetId)> = ri
                .element_sets(element_id)
                .filter(|&s| s != set_id && !used_witnesses.contains(&s))
                .map(|s| (ri.set_cost(s), s))
                .collect();
            candidates.sort_unstable();
            match candidates.first() {
                Some(&(cost, witness)) => {
                    used_witnesses.insert(witness);
                    witness_cost += cost;
                    if witness_cost > set_cost {
                        has_sdr = false;
                        break;
                    }
                }
                None => {
                    has_sdr = false;
                    break;
                }
            }
        }
        if has_sdr && witness_cost <= set_cost {
            ri.fix_out(set_id);
            changed = true;
        }
    }
    changed
}

/// Solve every small connected component to optimality by brute force and
/// fix every one of its sets accordingly.
pub(crate) fn reduce_small_components(ri: &mut ReductionInstance, max_sets: usize) -> bool {
    let mut changed = false;
    for (sets, elements) in live_components(ri) {
        // `brute_force_cover` packs elements into a `u64` bitmask: a
        // component can have at most `max_sets` sets yet still span more
        // than 64 elements (e.g. many sets each covering disjoint
        // elements), so the element count needs its own guard.
        if sets.is_empty() || sets.len() > max_sets || elements.is_empty() || elements.len() > 64 {
            continue;
        }
        if let Some(chosen) = brute_force_cover(ri, &sets, &elements) {
            for &set_id in &sets {
                if chosen.contains(&set_id) {
                    ri.fix_in(set_id);
                } else if !ri.is_set_removed(set_id) {
                    ri.fix_out(set_id);
                }
            }
            changed = true;
        }
    }
    changed
}

fn live_components(ri: &ReductionInstance) -> Vec<(Vec<SetId>, Vec<ElementId>)> {
    let mut element_seen = vec![false; ri.number_of_elements()];
    let mut set_seen = vec![false; ri.number_of_sets()];
    let mut components = Vec::new();

    for start in 0..ri.number_of_elements() {
        if ri.is_element_removed(start) || element_seen[start] {
            continue;
        }
        let mut elements = Vec::new();
        let mut sets = Vec::new();
        let mut stack = vec![start];
        element_seen[start] = true;
        while let Some(element_id) = stack.pop() {
            elements.push(element_id);
            for set_id in ri.element_sets(element_id) {
                if set_seen[set_id] {
                    continue;
                }
                set_seen[set_id] = true;
                sets.push(set_id);
                for other_element in ri.set_elements(set_id) {
                    if !element_seen[other_element] {
                        element_seen[other_element] = true;
                        stack.push(other_element);
                    }
                }
            }
        }
        components.push((sets, elements));
    }
    components
}

/// Minimum-cost covering subset of `sets` that covers every element of
/// `elements`, found by exhaustive enumeration. `sets.len()` is assumed
/// small (bounded by the caller).
fn brute_force_cover(
    ri: &ReductionInstance,
    sets: &[SetId],
    elements: &[ElementId],
) -> Option<HashSet<SetId>> {
    let element_index: HashMap<ElementId, usize> =
        elements.iter().enumerate().map(|(i, &e)| (e, i)).collect();
    let masks: Vec<u64> = sets
        .iter()
        .map(|&set_id| {
            ri.set_elements(set_id)
                .filter_map(|e| element_index.get(&e))
                .fold(0u64, |acc, &i| acc | (1u64 << i))
        })
        .collect();
    let full_mask: u64 = if elements.len() == 64 {
        u64::MAX
    } else {
        (1u64 << elements.len()) - 1
    };

    let mut best_cost: Option<Cost> = None;
    let mut best_mask = 0u64;
    for subset in 0..(1u64 << sets.len()) {
        let mut covered = 0u64;
        let mut cost = 0;
        for (i, &set_mask) in masks.iter().enumerate() {
            if subset & (1 << i) != 0 {
                covered |= set_mask;
                cost += ri.set_cost(sets[i]);
            }
        }
        if covered == full_mask && best_cost.is_none_or(|best| cost < best) {
            best_cost = Some(cost);
            best_mask = subset;
        }
    }

    best_cost.map(|_| {
        sets.iter()
            .enumerate()
            .filter(|(i, _)| best_mask & (1 << i) != 0)
            .map(|(_, &s)| s)
            .collect()
    })
}

#[cfg(test)]
#[path = "../tests_unit/reduction/rules.rs"]
mod tests;
