//! Mutable solution with incremental coverage maintenance (spec §3, §4.2).

use std::sync::Arc;

use crate::containers::IndexedSet;
use crate::instance::Instance;
use crate::types::{ComponentId, Cost, ElementId, SetId};

/// A mutable assignment of chosen sets, with O(|set|) add/remove and O(1)
/// feasibility, per-component cost, and per-element coverage count.
///
/// Created from an [`Instance`] and thereafter mutated only through
/// [`Solution::add`]/[`Solution::remove`]; attempting to add a set twice,
/// or remove a set not present, is a programming error and panics rather
/// than returning a `Result` (spec §7, "Programming error").
#[derive(Clone)]
pub struct Solution {
    instance: Arc<Instance>,
    sets: IndexedSet,
    /// Number of chosen sets covering each element.
    cover_count: Vec<u32>,
    /// Number of elements of each component with `cover_count > 0`.
    component_covered_elements: Vec<usize>,
    component_cost: Vec<Cost>,
    cost: Cost,
}

impl Solution {
    /// The empty solution over `instance`.
    pub fn new(instance: Arc<Instance>) -> Self {
        let number_of_sets = instance.number_of_sets();
        let number_of_elements = instance.number_of_elements();
        let number_of_components = instance.number_of_components();
        Self {
            cover_count: vec![0; number_of_elements],
            component_covered_elements: vec![0; number_of_components],
            component_cost: vec![0; number_of_components],
            cost: 0,
            sets: IndexedSet::new(number_of_sets),
            instance,
        }
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Number of sets chosen so far.
    pub fn number_of_sets(&self) -> usize {
        self.sets.len()
    }

    /// Chosen set IDs.
    pub fn sets(&self) -> &[SetId] {
        self.sets.present()
    }

    /// `true` iff `set_id` is chosen.
    #[inline]
    pub fn contains(&self, set_id: SetId) -> bool {
        self.sets.contains(set_id)
    }

    /// Number of chosen sets covering `element_id`.
    #[inline]
    pub fn cover_count(&self, element_id: ElementId) -> u32 {
        self.cover_count[element_id]
    }

    /// `true` iff `element_id` is covered by at least one chosen set.
    #[inline]
    pub fn covers(&self, element_id: ElementId) -> bool {
        self.cover_count[element_id] > 0
    }

    /// Total cost of the solution.
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Total cost of the chosen sets belonging to `component_id`.
    pub fn component_cost(&self, component_id: ComponentId) -> Cost {
        self.component_cost[component_id]
    }

    /// Number of covered elements of `component_id`.
    pub fn component_covered_elements(&self, component_id: ComponentId) -> usize {
        self.component_covered_elements[component_id]
    }

    /// `true` iff every element is covered.
    pub fn feasible(&self) -> bool {
        self.component_covered_elements
            .iter()
            .zip(self.instance.components())
            .all(|(&covered, component)| covered == component.elements.len())
    }

    /// `true` iff every element of `component_id` is covered.
    pub fn feasible_component(&self, component_id: ComponentId) -> bool {
        self.component_covered_elements[component_id]
            == self.instance.component(component_id).elements.len()
    }

    /// Add `set_id` to the solution.
    ///
    /// # Panics
    /// Panics if `set_id` is already chosen.
    pub fn add(&mut self, set_id: SetId) {
        assert!(
            !self.sets.contains(set_id),
            "set {set_id} is already in the solution"
        );
        let set = self.instance.set(set_id);
        for &element_id in &set.elements {
            if self.cover_count[element_id] == 0 {
                if let Some(component_id) = self.instance.element(element_id).component {
                    self.component_covered_elements[component_id] += 1;
                }
            }
            self.cover_count[element_id] += 1;
        }
        self.sets.add(set_id);
        if let Some(component_id) = set.component {
            self.component_cost[component_id] += set.cost;
        }
        self.cost += set.cost;
    }

    /// Remove `set_id` from the solution.
    ///
    /// # Panics
    /// Panics if `set_id` is not chosen.
    pub fn remove(&mut self, set_id: SetId) {
        assert!(
            self.sets.contains(set_id),
            "set {set_id} is not in the solution"
        );
        let set = self.instance.set(set_id);
        for &element_id in &set.elements {
            self.cover_count[element_id] -= 1;
            if self.cover_count[element_id] == 0 {
                if let Some(component_id) = self.instance.element(element_id).component {
                    self.component_covered_elements[component_id] -= 1;
                }
            }
        }
        self.sets.remove(set_id);
        if let Some(component_id) = set.component {
            self.component_cost[component_id] -= set.cost;
        }
        self.cost -= set.cost;
    }

    /// Replace the contents of `self` with a copy of `other`'s chosen
    /// sets. Used by the formatter to materialize a "best so far" snapshot
    /// without reallocating the underlying instance handle.
    pub fn copy_from(&mut self, other: &Solution) {
        debug_assert!(Arc::ptr_eq(&self.instance, &other.instance));
        for &set_id in self.sets.present().to_vec().iter() {
            if !other.contains(set_id) {
                self.remove(set_id);
            }
        }
        for &set_id in other.sets() {
            if !self.contains(set_id) {
                self.add(set_id);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests_unit/solution.rs"]
mod tests;
