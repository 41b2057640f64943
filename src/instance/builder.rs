//! Builder for [`Instance`] (spec §4.1).
//!
//! `add_sets`/`add_elements` size the universe, `set_cost`/`add_arc`
//! populate it, and a terminal `build()` computes `number_of_arcs`,
//! `total_cost`, and connected components. Arc insertion is not
//! idempotent: duplicating an arc is a caller error that would silently
//! break the bidirectional incidence invariant, so `build()` does not
//! attempt to detect it.

use super::{Element, Instance, Set};
use crate::error::{Result, SetCoverError};
use crate::types::{Cost, ElementId, SetId};

/// Incrementally constructs an [`Instance`].
#[derive(Debug, Default)]
pub struct InstanceBuilder {
    set_costs: Vec<Cost>,
    set_elements: Vec<Vec<ElementId>>,
    element_sets: Vec<Vec<SetId>>,
}

impl InstanceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure the instance has at least `n` sets, each defaulting to cost 1.
    pub fn add_sets(&mut self, n: usize) -> &mut Self {
        if n > self.set_costs.len() {
            self.set_costs.resize(n, 1);
            self.set_elements.resize(n, Vec::new());
        }
        self
    }

    /// Ensure the instance has at least `n` elements.
    pub fn add_elements(&mut self, n: usize) -> &mut Self {
        if n > self.element_sets.len() {
            self.element_sets.resize(n, Vec::new());
        }
        self
    }

    /// Set the cost of `set_id`, growing the instance if needed.
    pub fn set_cost(&mut self, set_id: SetId, cost: Cost) -> &mut Self {
        self.add_sets(set_id + 1);
        self.set_costs[set_id] = cost;
        self
    }

    /// Record that `set_id` covers `element_id`, growing the instance if
    /// needed. The caller must not insert the same arc twice.
    pub fn add_arc(&mut self, set_id: SetId, element_id: ElementId) -> &mut Self {
        self.add_sets(set_id + 1);
        self.add_elements(element_id + 1);
        self.set_elements[set_id].push(element_id);
        self.element_sets[element_id].push(set_id);
        self
    }

    /// Finalize the instance: compute arc/cost totals and connected
    /// components. Fails if any element has no covering set (spec §4.3,
    /// "Failure semantics": unreachable elements are a hard error in the
    /// builder).
    pub fn build(self) -> Result<Instance> {
        for (element_id, sets) in self.element_sets.iter().enumerate() {
            if sets.is_empty() {
                return Err(SetCoverError::UncoveredElement { element: element_id });
            }
        }

        let number_of_elements = self.element_sets.len();
        let number_of_sets = self.set_costs.len();
        let number_of_arcs: usize = self.set_elements.iter().map(Vec::len).sum();
        let total_cost: Cost = self.set_costs.iter().sum();

        let (components, element_component, set_component) = Instance::compute_components(
            number_of_elements,
            number_of_sets,
            &self.element_sets,
            &self.set_elements,
        );

        let elements = self
            .element_sets
            .into_iter()
            .zip(element_component)
            .map(|(sets, component)| Element { sets, component })
            .collect();

        let sets = self
            .set_costs
            .into_iter()
            .zip(self.set_elements)
            .zip(set_component)
            .map(|((cost, elements), component)| Set {
                cost,
                elements,
                component,
                mandatory: false,
            })
            .collect();

        Ok(Instance::new(
            elements,
            sets,
            components,
            total_cost,
            number_of_arcs,
        ))
    }
}

#[cfg(test)]
#[path = "../tests_unit/instance/builder.rs"]
mod tests;
