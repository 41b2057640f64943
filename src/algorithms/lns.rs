//! Large neighbourhood search (spec §4.5): destroy a handful of the
//! solution's least cost-effective sets, let every newly (and still)
//! uncovered element's penalty creep up by one, then greedily repair
//! with the best-scoring candidates until feasible again — removing any
//! set that cascading repairs have made entirely redundant along the
//! way. The best solution seen is tracked by the shared
//! [`AlgorithmFormatter`], so the working solution is free to wander
//! above it between improvements.

use std::sync::Arc;

use ordered_float::OrderedFloat;

use crate::algorithms::bounds::trivial_bound;
use crate::algorithms::formatter::{AlgorithmFormatter, AlgorithmOutput, AlgorithmParameters};
use crate::containers::{IndexedHeap, IndexedSet};
use crate::instance::Instance;
use crate::solution::Solution;
use crate::types::{Counter, ElementId, Penalty, SetId};

type Key = (OrderedFloat<f64>, Counter);

struct Search<'a> {
    instance: &'a Instance,
    solution: Solution,
    penalty: Vec<Penalty>,
    score: Vec<Penalty>,
    last_addition: Vec<Counter>,
    last_removal: Vec<Counter>,
    /// In-solution sets keyed by ascending `score / cost`: the root is
    /// the least cost-effective chosen set, next in line for removal.
    scores_in: IndexedHeap<Key>,
    /// Out-of-solution sets keyed by ascending `-score / cost`: the root
    /// is the most cost-effective candidate, next in line to be added.
    scores_out: IndexedHeap<Key>,
    uncovered: IndexedSet,
    iteration: Counter,
}

impl<'a> Search<'a> {
    fn new(instance: &'a Instance, solution: Solution) -> Self {
        let number_of_sets = instance.number_of_sets();
        let number_of_elements = instance.number_of_elements();
        let mut search = Self {
            instance,
            solution,
            penalty: vec![1; number_of_elements],
            score: vec![0; number_of_sets],
            last_addition: vec![0; number_of_sets],
            last_removal: vec![0; number_of_sets],
            scores_in: IndexedHeap::new(number_of_sets),
            scores_out: IndexedHeap::new(number_of_sets),
            uncovered: IndexedSet::new(number_of_elements),
            iteration: 0,
        };
        search.initialise();
        search
    }

    fn initialise(&mut self) {
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
            self.sync_in(s);
        }
    }

    fn in_key(&self, set_id: SetId) -> Key {
        let cost = self.instance.set(set_id).cost.max(1) as f64;
        (OrderedFloat(self.score[set_id] as f64 / cost), self.last_addition[set_id])
    }

    fn out_key(&self, set_id: SetId) -> Key {
        let cost = self.instance.set(set_id).cost.max(1) as f64;
        (OrderedFloat(-(self.score[set_id] as f64) / cost), self.last_removal[set_id])
    }

    /// Keep `scores_in`'s entry for `set_id` in sync, if it has one.
    fn sync_in(&mut self, set_id: SetId) {
        if self.solution.contains(set_id) {
            let key = self.in_key(set_id);
            self.scores_in.push(set_id, key);
        }
    }

    /// Keep `scores_out`'s entry for `set_id` in sync, if it has one.
    fn sync_out(&mut self, set_id: SetId) {
        if !self.solution.contains(set_id) {
            let key = self.out_key(set_id);
            self.scores_out.push(set_id, key);
        }
    }

    fn remove_set(&mut self, set_id: SetId) {
        self.scores_in.remove(set_id);
        self.solution.remove(set_id);
        self.last_removal[set_id] = self.iteration;
        self.sync_out(set_id);

        let instance = self.instance;
        let mut touched = Vec::new();
        for &e in instance.set(set_id).elements.iter() {
            let cc = self.solution.cover_count(e);
            if cc == 0 {
                self.uncovered.add(e);
                for &t in instance.element(e).sets.iter() {
                    if t != set_id {
                        self.score[t] += self.penalty[e];
                        touched.push(t);
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
            self.sync_in(t);
            self.sync_out(t);
        }
    }

    fn add_set(&mut self, set_id: SetId) {
        self.scores_out.remove(set_id);
        self.solution.add(set_id);
        self.last_addition[set_id] = self.iteration;
        self.sync_in(set_id);

        let instance = self.instance;
        let mut touched = Vec::new();
        for &e in instance.set(set_id).elements.iter() {
            let cc = self.solution.cover_count(e);
            if cc == 1 {
                self.uncovered.remove(e);
                for &t in instance.element(e).sets.iter() {
                    if t != set_id && !self.solution.contains(t) {
                        self.score[t] -= self.penalty[e];
                        touched.push(t);
                    }
                }
            } else if cc == 2 {
                for &t in instance.element(e).sets.iter() {
                    if t != set_id && self.solution.contains(t) {
                        self.score[t] -= self.penalty[e];
                        touched.push(t);
                    }
                }
            }
        }
        touched.sort_unstable();
        touched.dedup();
        for t in touched {
            self.sync_in(t);
            self.sync_out(t);
        }

        self.remove_redundant_neighbours(set_id);
    }

    /// Any in-solution set sharing an element with `set_id` whose score
    /// has dropped to zero no longer covers anything exclusively, so
    /// dropping it is free. Removing one can zero out another in turn,
    /// hence the re-check before each removal.
    fn remove_redundant_neighbours(&mut self, set_id: SetId) {
        let instance = self.instance;
        let mut candidates = Vec::new();
        for &e in instance.set(set_id).elements.iter() {
            for &t in instance.element(e).sets.iter() {
                if self.solution.contains(t) {
                    candidates.push(t);
                }
            }
        }
        candidates.sort_unstable();
        candidates.dedup();
        for t in candidates {
            if self.solution.contains(t) && self.score[t] == 0 {
                self.remove_set(t);
            }
        }
    }

    fn bump_uncovered_penalties(&mut self) {
        let instance = self.instance;
        let uncovered: Vec<ElementId> = self.uncovered.present().to_vec();
        for e in uncovered {
            self.penalty[e] += 1;
            for &t in instance.element(e).sets.iter() {
                self.score[t] += 1;
                self.sync_in(t);
                self.sync_out(t);
            }
        }
    }
}

/// Run large neighbourhood search starting from `initial`.
///
/// Each iteration removes `destroy_size` sets (at least `1`) from
/// `scores_in`'s worst end, bumps every uncovered element's penalty, and
/// repairs from `scores_out`'s best end until feasible. The dual bound
/// reported throughout is [`trivial_bound`], computed once up front.
pub fn large_neighborhood_search(
    instance: Arc<Instance>,
    initial: Solution,
    parameters: AlgorithmParameters,
    destroy_size: usize,
) -> AlgorithmOutput {
    let formatter = AlgorithmFormatter::new(initial.clone(), &parameters);
    if instance.number_of_elements() == 0 {
        return formatter.finish(0);
    }
    let bound = trivial_bound(&instance);
    let destroy_size = destroy_size.max(1);

    let mut search = Search::new(&instance, initial);
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
        if formatter.best_cost() == bound {
            break;
        }

        for _ in 0..destroy_size {
            let set_id = match search.scores_in.peek() {
                Some((id, _)) => id,
                None => break,
            };
            search.remove_set(set_id);
        }

        search.bump_uncovered_penalties();

        while !search.solution.feasible() {
            let set_id = match search.scores_out.peek() {
                Some((id, _)) => id,
                None => break,
            };
            search.add_set(set_id);
        }

        if search.solution.feasible() && formatter.update(&search.solution, bound) {
            iterations_without_improvement = 0;
        }

        search.iteration += 1;
        iterations_without_improvement += 1;
    }

    formatter.finish(bound)
}

#[cfg(test)]
#[path = "../tests_unit/algorithms/lns.rs"]
mod tests;
