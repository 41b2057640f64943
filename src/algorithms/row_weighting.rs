//! Row-weighting local search (spec §4.4): a penalty-guided hill climber
//! that alternates two phases on whichever component/group is due for a
//! turn (round-robin, windows proportional to group size):
//!
//! - **Strip**: while removing the group's lowest-scoring chosen set
//!   would leave everything covered, do it — for free. A chosen set's
//!   score is the sum of the penalties of the elements it alone covers,
//!   so a score of zero means removing it is perfectly safe. The last
//!   removal of a strip (the one that finally uncovers something) is
//!   "paid": it's taken anyway, to keep the search moving.
//! - **Repair**: add back the best-scoring candidate for a random
//!   uncovered element, repeating until the group is feasible again.
//!   Once many consecutive turns have passed without the group
//!   improving, one extra forced removal precedes the repair, for a
//!   deeper kick (`local-search-row-weighting`'s "swap" move).
//!
//! Every uncovered element's penalty is bumped on the turn it becomes
//! uncovered, so the same set looks less attractive next time a
//! component revisits the same dead end.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;

use crate::algorithms::formatter::{AlgorithmFormatter, AlgorithmOutput, AlgorithmParameters};
use crate::containers::{IndexedHeap, IndexedSet};
use crate::instance::Instance;
use crate::rng::from_seed;
use crate::solution::Solution;
use crate::types::{ComponentId, Counter, ElementId, Penalty, SetId};

/// Above this, every penalty is halved (rounding up) and every score is
/// recomputed from scratch, to stay well clear of `Penalty::MAX`.
const OVERFLOW_THRESHOLD: Penalty = 2_000_000_000_000_000;

/// Number of turns a group gets on plain strip/repair before a turn
/// instead does one extra forced removal (a deeper kick) first.
const SWAP_THRESHOLD_PER_SET: Counter = 100;

fn bump_amount(number_of_covering_sets: usize) -> Penalty {
    (10_000 / number_of_covering_sets.max(1) as Penalty).max(1)
}

/// A partition of the instance's sets/elements for bookkeeping purposes.
/// Either the connected components, or a single group spanning
/// everything; see the module docs.
struct Group {
    elements: Vec<ElementId>,
    sets: Vec<SetId>,
}

struct GroupState {
    /// In-solution sets of this group, keyed by `(score, timestamp)` so
    /// the root is always the oldest lowest-scoring member.
    scores_in: IndexedHeap<(Penalty, Counter)>,
    /// Currently uncovered elements of this group, for O(1) random draws.
    uncovered: IndexedSet,
    turns: Counter,
    window_start: Counter,
    window_end: Counter,
    /// Set once every in-solution set of this group is mandatory to stay
    /// feasible (`strip` finds nothing left it could remove for free):
    /// the group's current solution is the best row-weighting can do, so
    /// it is excluded from future round-robin windows (spec §4.4).
    optimal: bool,
}

struct Search<'a> {
    instance: &'a Instance,
    solution: Solution,
    rng: StdRng,
    penalty: Vec<Penalty>,
    score: Vec<Penalty>,
    timestamp: Vec<Counter>,
    group_of_set: Vec<Option<ComponentId>>,
    pos_in_group_sets: Vec<usize>,
    group_of_element: Vec<ComponentId>,
    pos_in_group_elements: Vec<usize>,
    groups: Vec<Group>,
    state: Vec<GroupState>,
    iteration: Counter,
}

impl<'a> Search<'a> {
    fn new(instance: &'a Instance, solution: Solution, partition_by_component: bool, seed: u64) -> Self {
        let number_of_sets = instance.number_of_sets();
        let number_of_elements = instance.number_of_elements();

        let groups: Vec<Group> = if partition_by_component {
            instance
                .components()
                .iter()
                .map(|c| Group {
                    elements: c.elements.clone(),
                    sets: c.sets.clone(),
                })
                .collect()
        } else {
            vec![Group {
                elements: (0..number_of_elements).collect(),
                sets: (0..number_of_sets).filter(|&s| instance.set(s).component.is_some()).collect(),
            }]
        };

        let mut group_of_set: Vec<Option<ComponentId>> = vec![None; number_of_sets];
        let mut pos_in_group_sets = vec![0usize; number_of_sets];
        let mut group_of_element: Vec<ComponentId> = vec![0; number_of_elements];
        let mut pos_in_group_elements = vec![0usize; number_of_elements];
        for (g, group) in groups.iter().enumerate() {
            for (pos, &s) in group.sets.iter().enumerate() {
                group_of_set[s] = Some(g);
                pos_in_group_sets[s] = pos;
            }
            for (pos, &e) in group.elements.iter().enumerate() {
                group_of_element[e] = g;
                pos_in_group_elements[e] = pos;
            }
        }

        let mut window_cursor: Counter = 0;
        let state: Vec<GroupState> = groups
            .iter()
            .map(|group| {
                let window_start = window_cursor;
                let window_end = window_start + group.elements.len().max(1) as Counter;
                window_cursor = window_end;
                GroupState {
                    scores_in: IndexedHeap::new(group.sets.len()),
                    uncovered: IndexedSet::new(group.elements.len()),
                    turns: 0,
                    window_start,
                    window_end,
                    optimal: false,
                }
            })
            .collect();

        let mut search = Self {
            instance,
            solution,
            rng: from_seed(seed),
            penalty: vec![0; number_of_elements],
            score: vec![0; number_of_sets],
            timestamp: vec![0; number_of_sets],
            group_of_set,
            pos_in_group_sets,
            group_of_element,
            pos_in_group_elements,
            groups,
            state,
            iteration: 0,
        };
        search.initialise();
        search
    }

    fn initialise(&mut self) {
        for e in 0..self.instance.number_of_elements() {
            self.penalty[e] = bump_amount(self.instance.element(e).sets.len());
        }
        for e in 0..self.instance.number_of_elements() {
            if self.solution.cover_count(e) == 1 {
                for &s in &self.instance.element(e).sets {
                    if self.solution.contains(s) {
                        self.score[s] += self.penalty[e];
                    }
                }
            }
        }
        for &s in self.solution.sets().to_vec().iter() {
            self.push_in_solution(s);
        }
    }

    fn push_in_solution(&mut self, set_id: SetId) {
        if let Some(g) = self.group_of_set[set_id] {
            let pos = self.pos_in_group_sets[set_id];
            self.state[g].scores_in.push(pos, (self.score[set_id], self.timestamp[set_id]));
        }
    }

    fn remove_from_heap(&mut self, set_id: SetId) {
        if let Some(g) = self.group_of_set[set_id] {
            let pos = self.pos_in_group_sets[set_id];
            self.state[g].scores_in.remove(pos);
        }
    }

    fn mark_uncovered(&mut self, element_id: ElementId) {
        let g = self.group_of_element[element_id];
        let pos = self.pos_in_group_elements[element_id];
        self.state[g].uncovered.add(pos);
    }

    fn mark_covered(&mut self, element_id: ElementId) {
        let g = self.group_of_element[element_id];
        let pos = self.pos_in_group_elements[element_id];
        self.state[g].uncovered.remove(pos);
    }

    /// Drop `set_id` from the solution, updating every affected set's
    /// score and every newly uncovered element's bookkeeping in one pass,
    /// then bumping the penalty of whatever is left uncovered.
    fn remove_set(&mut self, set_id: SetId) {
        let instance = self.instance;
        self.remove_from_heap(set_id);
        self.solution.remove(set_id);
        self.timestamp[set_id] = self.iteration;

        let mut touched = Vec::new();
        for &e in instance.set(set_id).elements.iter() {
            let cc = self.solution.cover_count(e);
            if cc == 0 {
                self.mark_uncovered(e);
                for &t in instance.element(e).sets.iter() {
                    if t != set_id {
                        self.score[t] += self.penalty[e];
                        if self.solution.contains(t) {
                            touched.push(t);
                        }
                    }
                }
            } else if cc == 1 {
                for &t in instance.element(e).sets.iter() {
                    if self.solution.contains(t) {
                        self.score[t] += self.penalty[e];
                        touched.push(t);
                    }
                }
            }
        }
        touched.sort_unstable();
        touched.dedup();
        for t in touched {
            self.update_in_solution_key(t);
        }

        self.bump_penalties_of(set_id);
    }

    /// Add `set_id` to the solution. Its own score already holds the
    /// right post-add value (see module docs): every element it newly
    /// covers was, by construction, contributing exactly its penalty to
    /// this out-of-solution candidate's score already.
    fn add_set(&mut self, set_id: SetId) {
        let instance = self.instance;
        self.solution.add(set_id);
        self.timestamp[set_id] = self.iteration;

        let mut touched = Vec::new();
        for &e in instance.set(set_id).elements.iter() {
            let cc = self.solution.cover_count(e);
            if cc == 1 {
                self.mark_covered(e);
                for &t in instance.element(e).sets.iter() {
                    if t != set_id && !self.solution.contains(t) {
                        self.score[t] -= self.penalty[e];
                    }
                }
            } else if cc == 2 {
                for &t in instance.element(e).sets.iter() {
                    if self.solution.contains(t) && t != set_id {
                        self.score[t] -= self.penalty[e];
                        touched.push(t);
                    }
                }
            }
        }
        touched.sort_unstable();
        touched.dedup();
        for t in touched {
            self.update_in_solution_key(t);
        }
        self.push_in_solution(set_id);
    }

    fn update_in_solution_key(&mut self, set_id: SetId) {
        if let Some(g) = self.group_of_set[set_id] {
            let pos = self.pos_in_group_sets[set_id];
            if self.state[g].scores_in.contains(pos) {
                self.state[g].scores_in.update(pos, (self.score[set_id], self.timestamp[set_id]));
            }
        }
    }

    /// Every element freshly uncovered by removing `removed` gets its
    /// penalty bumped, with the bump propagated to every set touching it
    /// (in solution or not) so the landscape reflects the new weights.
    fn bump_penalties_of(&mut self, removed: SetId) {
        let instance = self.instance;
        for &e in instance.set(removed).elements.iter() {
            if self.solution.cover_count(e) != 0 {
                continue;
            }
            let bump = bump_amount(instance.element(e).sets.len());
            self.penalty[e] += bump;
            for &t in instance.element(e).sets.iter() {
                self.score[t] += bump;
                self.update_in_solution_key(t);
            }
        }
        if self.penalty.iter().any(|&p| p > OVERFLOW_THRESHOLD) {
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        for p in self.penalty.iter_mut() {
            *p = (*p + 1) / 2;
        }
        self.score.fill(0);
        for e in 0..self.instance.number_of_elements() {
            let cc = self.solution.cover_count(e);
            if cc == 0 {
                for &t in self.instance.element(e).sets.iter() {
                    self.score[t] += self.penalty[e];
                }
            } else if cc == 1 {
                for &t in self.instance.element(e).sets.iter() {
                    if self.solution.contains(t) {
                        self.score[t] += self.penalty[e];
                    }
                }
            }
        }
        for (g, group) in self.groups.iter().enumerate() {
            for &s in &group.sets {
                if self.solution.contains(s) {
                    let pos = self.pos_in_group_sets[s];
                    self.state[g].scores_in.push(pos, (self.score[s], self.timestamp[s]));
                }
            }
        }
    }

    /// Best out-of-solution set covering `element_id`, maximising score
    /// and breaking ties by oldest timestamp.
    fn best_candidate(&self, element_id: ElementId) -> Option<SetId> {
        self.instance
            .element(element_id)
            .sets
            .iter()
            .copied()
            .filter(|&s| !self.solution.contains(s))
            .max_by_key(|&s| (self.score[s], -self.timestamp[s]))
    }

    fn random_uncovered_element(&mut self, group: ComponentId) -> ElementId {
        let present = self.state[group].uncovered.present();
        let local = present[self.rng.random_range(0..present.len())];
        self.groups[group].elements[local]
    }

    /// While removing the group's lowest-scoring chosen set would still
    /// leave it feasible, do so; take one further ("paid") removal once
    /// that stops being true, so every turn makes some move. If the group
    /// is feasible and its in-solution heap is already empty, every set
    /// still chosen is mandatory to stay feasible: the group is optimal.
    fn strip(&mut self, group: ComponentId) {
        while self.state[group].uncovered.is_empty() {
            let Some((pos, _)) = self.state[group].scores_in.peek() else {
                self.state[group].optimal = true;
                return;
            };
            let set_id = self.groups[group].sets[pos];
            self.remove_set(set_id);
            if !self.state[group].uncovered.is_empty() {
                return;
            }
        }
    }

    /// Reassign each group's round-robin window, giving every optimal
    /// group zero width so it is never selected again, and shifting
    /// windows down to close the gap.
    fn recompute_windows(&mut self) {
        let mut cursor: Counter = 0;
        for (g, group) in self.groups.iter().enumerate() {
            self.state[g].window_start = cursor;
            if !self.state[g].optimal {
                cursor += group.elements.len().max(1) as Counter;
            }
            self.state[g].window_end = cursor;
        }
    }

    fn all_groups_optimal(&self) -> bool {
        self.state.iter().all(|s| s.optimal)
    }

    /// Add back the best candidate for a random uncovered element,
    /// repeating until the group is feasible (or no candidate remains,
    /// which cannot happen on a connected, originally feasible instance).
    fn repair(&mut self, group: ComponentId) {
        while !self.state[group].uncovered.is_empty() {
            let element_id = self.random_uncovered_element(group);
            match self.best_candidate(element_id) {
                Some(candidate) => self.add_set(candidate),
                None => break,
            }
        }
    }

    /// One extra forced removal before `repair`, for a deeper kick once
    /// plain strip/repair cycling has stalled.
    fn kick_and_repair(&mut self, group: ComponentId) {
        if let Some((pos, _)) = self.state[group].scores_in.peek() {
            let set_id = self.groups[group].sets[pos];
            self.remove_set(set_id);
        }
        self.repair(group);
    }
}

/// Run row-weighting local search starting from `initial`.
///
/// `partition_by_component = true` is `local-search-row-weighting-2`
/// (bookkeeping split per connected component); `false` is
/// `local-search-row-weighting-1` (one pool covering the whole instance).
///
/// This is a pure improvement heuristic: it never derives a dual bound of
/// its own, so `AlgorithmOutput::bound` is reported as `0` and the CLI
/// layer is responsible for overlaying [`super::bounds`] output if a gap
/// is wanted.
pub fn local_search_row_weighting(
    instance: Arc<Instance>,
    initial: Solution,
    partition_by_component: bool,
    parameters: AlgorithmParameters,
) -> AlgorithmOutput {
    let bound = 0;
    let formatter = AlgorithmFormatter::new(initial.clone(), &parameters);
    if instance.number_of_elements() == 0 {
        return formatter.finish(bound);
    }

    let mut search = Search::new(&instance, initial, partition_by_component, parameters.seed);
    let mut component_id: ComponentId = 0;
    let mut iterations_without_improvement: Counter = 0;

    loop {
        if parameters.timer.needs_to_end() {
            break;
        }
        if let Some(max_it) = parameters.maximum_number_of_iterations {
            if search.iteration >= max_it {
                break;
            }
        }
        if let Some(max_stall) = parameters.maximum_number_of_iterations_without_improvement {
            if iterations_without_improvement >= max_stall {
                break;
            }
        }
        if formatter.goal_reached(parameters.goal) {
            break;
        }

        let total_window = search.state.last().map(|s| s.window_end).unwrap_or(0);
        if total_window == 0 {
            break;
        }
        let slot = search.iteration % total_window;
        while !(search.state[component_id].window_start <= slot && slot < search.state[component_id].window_end) {
            component_id = (component_id + 1) % search.groups.len();
        }

        if search.iteration % parameters.best_solution_update_frequency == 0 && search.solution.feasible() {
            if formatter.update(&search.solution, bound) {
                iterations_without_improvement = 0;
            }
        }

        search.strip(component_id);
        if search.state[component_id].optimal {
            search.recompute_windows();
            if search.all_groups_optimal() {
                break;
            }
        } else if search.state[component_id].turns < SWAP_THRESHOLD_PER_SET * search.groups[component_id].sets.len().max(1) as Counter {
            search.repair(component_id);
        } else {
            search.kick_and_repair(component_id);
        }
        search.state[component_id].turns += 1;

        search.iteration += 1;
        iterations_without_improvement += 1;
    }

    if search.solution.feasible() {
        formatter.update(&search.solution, bound);
    }
    formatter.finish(bound)
}

#[cfg(test)]
#[path = "../tests_unit/algorithms/row_weighting.rs"]
mod tests;
