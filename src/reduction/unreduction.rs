//! The unreduction map: tagged `in`/`out` lists of original set IDs that
//! lift a solution of a reduced instance back to the original instance
//! (spec §3 "UnreductionMap", §4.3 "UnreductionMap composition").

use std::sync::Arc;

use crate::instance::Instance;
use crate::solution::Solution;
use crate::types::{Cost, SetId};

/// Per reduced-set lift instructions.
#[derive(Debug, Clone, Default)]
pub struct UnreductionOperations {
    /// Original-instance sets to add when the reduced set is selected.
    pub in_sets: Vec<SetId>,
    /// Original-instance sets to add when the reduced set is NOT selected.
    pub out_sets: Vec<SetId>,
}

/// Lifts a solution (or a bound) of a reduced instance back to the
/// original instance it was reduced from.
///
/// Composed incrementally while the reduction engine runs: folding swaps
/// and appends `in`/`out` lists, deduplication appends a removed
/// duplicate's `out` list into `mandatory`, and fixing a set's membership
/// appends its `in` (if forced in) or `out` (if forced out) list into
/// `mandatory`. None of these operations ever need a cross-reference
/// between sets — every composition is a list splice or swap.
#[derive(Debug, Clone)]
pub struct UnreductionMap {
    /// Indexed by reduced-instance set ID.
    operations: Vec<UnreductionOperations>,
    /// Original-instance sets always added, regardless of the reduced
    /// solution.
    mandatory: Vec<SetId>,
    /// Cost of `mandatory`, added to every lifted solution's cost.
    extra_cost: Cost,
}

impl UnreductionMap {
    pub(crate) fn new(
        operations: Vec<UnreductionOperations>,
        mandatory: Vec<SetId>,
        extra_cost: Cost,
    ) -> Self {
        Self {
            operations,
            mandatory,
            extra_cost,
        }
    }

    /// The identity map: every set of `instance` maps to itself, nothing
    /// is mandatory. Used when reduction is disabled or exhausts its
    /// round budget without ever firing a rule.
    pub fn identity(instance: &Instance) -> Self {
        let operations = (0..instance.number_of_sets())
            .map(|set_id| UnreductionOperations {
                in_sets: vec![set_id],
                out_sets: Vec::new(),
            })
            .collect();
        Self {
            operations,
            mandatory: Vec::new(),
            extra_cost: 0,
        }
    }

    pub fn extra_cost(&self) -> Cost {
        self.extra_cost
    }

    pub fn mandatory_sets(&self) -> &[SetId] {
        &self.mandatory
    }

    pub fn operations(&self, reduced_set_id: SetId) -> &UnreductionOperations {
        &self.operations[reduced_set_id]
    }

    /// Lift a reduced-instance solution to a solution of `original`.
    ///
    /// For every reduced-instance solution `S`, `lift(S)` is feasible on
    /// `original` and `cost(lift(S)) = cost(S) + extra_cost` (spec §3, §8
    /// "Reduction round-trip").
    pub fn lift(&self, original: Arc<Instance>, reduced: &Solution) -> Solution {
        let mut lifted = Solution::new(original);
        let mut added = vec![false; lifted.instance().number_of_sets()];

        let mut add_unique = |lifted: &mut Solution, added: &mut [bool], set_id: SetId| {
            if !added[set_id] {
                added[set_id] = true;
                lifted.add(set_id);
            }
        };

        for &set_id in &self.mandatory {
            add_unique(&mut lifted, &mut added, set_id);
        }
        for (reduced_set_id, ops) in self.operations.iter().enumerate() {
            let chosen = reduced.contains(reduced_set_id);
            let list = if chosen { &ops.in_sets } else { &ops.out_sets };
            for &set_id in list {
                add_unique(&mut lifted, &mut added, set_id);
            }
        }
        lifted
    }

    /// Lift a bound of the reduced instance to a bound on the original.
    pub fn lift_bound(&self, bound: Cost) -> Cost {
        bound + self.extra_cost
    }
}

#[cfg(test)]
#[path = "../tests_unit/reduction/unreduction.rs"]
mod tests;
