//! The reduction engine's mutable working representation (spec §4.3,
//! §9 "Mutable graph with tombstones").
//!
//! Rather than modelling the shrinking incidence graph with interior
//! pointers, each set and element carries a `removed` tombstone flag and
//! keeps its original neighbour list; a live-degree counter is maintained
//! incrementally so rules can ask "how many live elements does this set
//! cover" in O(1) without re-scanning. A [`ReductionInstance::compact`]
//! pass periodically rebuilds dense ID ranges, discarding tombstones and
//! remapping every incidence and the parallel unreduction-operations
//! vector in lock-step.

use std::sync::Arc;

use crate::instance::Instance;
use crate::reduction::unreduction::{UnreductionMap, UnreductionOperations};
use crate::types::{Cost, ElementId, SetId};

#[derive(Debug, Clone)]
pub(crate) struct ReductionSet {
    pub removed: bool,
    pub cost: Cost,
    pub elements: Vec<ElementId>,
    pub live_degree: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct ReductionElement {
    pub removed: bool,
    pub sets: Vec<SetId>,
    pub live_degree: usize,
}

/// The reduction engine's mutable copy of the instance being shrunk.
pub(crate) struct ReductionInstance {
    original: Arc<Instance>,
    sets: Vec<ReductionSet>,
    elements: Vec<ReductionElement>,
    unreduction: Vec<UnreductionOperations>,
    mandatory: Vec<SetId>,
    mandatory_added: Vec<bool>,
    extra_cost: Cost,
}

impl ReductionInstance {
    pub fn from_instance(original: Arc<Instance>) -> Self {
        let sets = original
            .sets()
            .iter()
            .map(|s| ReductionSet {
                removed: false,
                cost: s.cost,
                elements: s.elements.clone(),
                live_degree: s.elements.len(),
            })
            .collect();
        let elements = original
            .elements()
            .iter()
            .map(|e| ReductionElement {
                removed: false,
                sets: e.sets.clone(),
                live_degree: e.sets.len(),
            })
            .collect();
        let unreduction = (0..original.number_of_sets())
            .map(|set_id| UnreductionOperations {
                in_sets: vec![set_id],
                out_sets: Vec::new(),
            })
            .collect();
        let mandatory_added = vec![false; original.number_of_sets()];
        Self {
            original,
            sets,
            elements,
            unreduction,
            mandatory: Vec::new(),
            mandatory_added,
            extra_cost: 0,
        }
    }

    pub fn original(&self) -> &Instance {
        &self.original
    }

    pub fn number_of_sets(&self) -> usize {
        self.sets.len()
    }

    pub fn number_of_elements(&self) -> usize {
        self.elements.len()
    }

    pub fn is_set_removed(&self, set_id: SetId) -> bool {
        self.sets[set_id].removed
    }

    pub fn is_element_removed(&self, element_id: ElementId) -> bool {
        self.elements[element_id].removed
    }

    pub fn set_cost(&self, set_id: SetId) -> Cost {
        self.sets[set_id].cost
    }

    /// Number of live elements covered by `set_id`.
    pub fn set_degree(&self, set_id: SetId) -> usize {
        self.sets[set_id].live_degree
    }

    /// Number of live sets covering `element_id`.
    pub fn element_degree(&self, element_id: ElementId) -> usize {
        self.elements[element_id].live_degree
    }

    /// Live elements covered by `set_id`.
    pub fn set_elements(&self, set_id: SetId) -> impl Iterator<Item = ElementId> + '_ {
        self.sets[set_id]
            .elements
            .iter()
            .copied()
            .filter(move |&e| !self.elements[e].removed)
    }

    /// Live sets covering `element_id`.
    pub fn element_sets(&self, element_id: ElementId) -> impl Iterator<Item = SetId> + '_ {
        self.elements[element_id]
            .sets
            .iter()
            .copied()
            .filter(move |&s| !self.sets[s].removed)
    }

    pub fn unreduction_ops(&self, set_id: SetId) -> &UnreductionOperations {
        &self.unreduction[set_id]
    }

    /// Permanently fix `set_id` as chosen: the set's `in`-lifted original
    /// sets become mandatory, the set itself is tombstoned, and every
    /// element it covers is removed (it is now permanently satisfied).
    pub fn fix_in(&mut self, set_id: SetId) {
        let in_sets = std::mem::take(&mut self.unreduction[set_id].in_sets);
        self.add_mandatory(&in_sets);
        let elements: Vec<ElementId> = self.set_elements(set_id).collect();
        self.remove_set(set_id);
        for element_id in elements {
            self.remove_element(element_id);
        }
    }

    /// Permanently fix `set_id` as excluded: the set's `out`-lifted
    /// original sets become mandatory, and the set itself is tombstoned.
    pub fn fix_out(&mut self, set_id: SetId) {
        let out_sets = std::mem::take(&mut self.unreduction[set_id].out_sets);
        self.add_mandatory(&out_sets);
        self.remove_set(set_id);
    }

    fn add_mandatory(&mut self, original_ids: &[SetId]) {
        for &original_id in original_ids {
            if !self.mandatory_added[original_id] {
                self.mandatory_added[original_id] = true;
                self.extra_cost += self.original.set(original_id).cost;
                self.mandatory.push(original_id);
            }
        }
    }

    /// Tombstone `set_id` without touching its elements or the
    /// unreduction map (the caller has already extracted whatever it
    /// needed from `unreduction_ops(set_id)`).
    pub fn remove_set(&mut self, set_id: SetId) {
        if self.sets[set_id].removed {
            return;
        }
        self.sets[set_id].removed = true;
        let elements = self.sets[set_id].elements.clone();
        for element_id in elements {
            if !self.elements[element_id].removed {
                self.elements[element_id].live_degree -= 1;
            }
        }
    }

    /// Tombstone `element_id`: it is satisfied and no longer constrains
    /// the instance.
    pub fn remove_element(&mut self, element_id: ElementId) {
        if self.elements[element_id].removed {
            return;
        }
        self.elements[element_id].removed = true;
        let sets = self.elements[element_id].sets.clone();
        for set_id in sets {
            if !self.sets[set_id].removed {
                self.sets[set_id].live_degree -= 1;
            }
        }
    }

    /// Replace `set_id`'s covered elements with `new_elements` and its
    /// cost with `new_cost`, recomputing incidence and live degree. Used
    /// by set folding and twin to turn `set_id` into an aggregate.
    pub fn redefine_set(&mut self, set_id: SetId, new_elements: Vec<ElementId>, new_cost: Cost) {
        // Detach from the old elements' incidence lists.
        for &old_element in self.sets[set_id].elements.clone().iter() {
            if let Some(pos) = self.elements[old_element]
                .sets
                .iter()
                .position(|&s| s == set_id)
            {
                self.elements[old_element].sets.remove(pos);
            }
        }
        for &new_element in &new_elements {
            self.elements[new_element].sets.push(set_id);
        }
        self.sets[set_id].elements = new_elements;
        self.sets[set_id].cost = new_cost;
        self.sets[set_id].live_degree = self.sets[set_id]
            .elements
            .iter()
            .filter(|&&e| !self.elements[e].removed)
            .count();
    }

    /// Overwrite `set_id`'s unreduction operations. Used by set folding
    /// and twin to swap-and-append the `in`/`out` lists.
    pub fn set_unreduction_ops(&mut self, set_id: SetId, ops: UnreductionOperations) {
        self.unreduction[set_id] = ops;
    }

    /// Fraction of sets not yet tombstoned.
    pub fn live_set_fraction(&self) -> f64 {
        if self.sets.is_empty() {
            return 1.0;
        }
        let live = self.sets.iter().filter(|s| !s.removed).count();
        live as f64 / self.sets.len() as f64
    }

    /// Fraction of elements not yet tombstoned.
    pub fn live_element_fraction(&self) -> f64 {
        if self.elements.is_empty() {
            return 1.0;
        }
        let live = self.elements.iter().filter(|e| !e.removed).count();
        live as f64 / self.elements.len() as f64
    }

    /// Rebuild dense ID ranges, dropping every tombstoned set/element and
    /// remapping all incidences and the unreduction vector in lock-step.
    pub fn compact(&mut self) {
        let mut new_set_id = vec![None; self.sets.len()];
        let mut new_sets = Vec::new();
        let mut new_unreduction = Vec::new();
        for (old_id, set) in self.sets.iter().enumerate() {
            if set.removed {
                continue;
            }
            new_set_id[old_id] = Some(new_sets.len());
            new_sets.push(ReductionSet {
                removed: false,
                cost: set.cost,
                elements: Vec::new(),
                live_degree: 0,
            });
            new_unreduction.push(self.unreduction[old_id].clone());
        }

        let mut new_element_id = vec![None; self.elements.len()];
        let mut new_elements = Vec::new();
        for (old_id, element) in self.elements.iter().enumerate() {
            if element.removed {
                continue;
            }
            new_element_id[old_id] = Some(new_elements.len());
            new_elements.push(ReductionElement {
                removed: false,
                sets: Vec::new(),
                live_degree: 0,
            });
        }

        for (old_set_id, set) in self.sets.iter().enumerate() {
            if set.removed {
                continue;
            }
            let new_s = new_set_id[old_set_id].unwrap();
            for &old_element_id in &set.elements {
                if self.elements[old_element_id].removed {
                    continue;
                }
                let new_e = new_element_id[old_element_id].unwrap();
                new_sets[new_s].elements.push(new_e);
                new_elements[new_e].sets.push(new_s);
            }
        }
        for set in &mut new_sets {
            set.live_degree = set.elements.len();
        }
        for element in &mut new_elements {
            element.live_degree = element.sets.len();
        }

        self.sets = new_sets;
        self.elements = new_elements;
        self.unreduction = new_unreduction;
    }

    /// Recompute degrees and both-way incidence from scratch and compare
    /// against the live-degree bookkeeping. Used by debug runs only; a
    /// mismatch is a fatal bug in a reduction rule, never a condition to
    /// recover from (spec §7, §9).
    pub fn check(&self) -> bool {
        for (set_id, set) in self.sets.iter().enumerate() {
            if set.removed {
                continue;
            }
            let degree = set
                .elements
                .iter()
                .filter(|&&e| !self.elements[e].removed)
                .count();
            if degree != set.live_degree {
                return false;
            }
            for &element_id in &set.elements {
                if self.elements[element_id].removed {
                    continue;
                }
                if !self.elements[element_id].sets.contains(&set_id) {
                    return false;
                }
            }
        }
        for (element_id, element) in self.elements.iter().enumerate() {
            if element.removed {
                continue;
            }
            let degree = element
                .sets
                .iter()
                .filter(|&&s| !self.sets[s].removed)
                .count();
            if degree != element.live_degree {
                return false;
            }
        }
        true
    }

    /// Finalize: build the reduced [`Instance`] and the composed
    /// [`UnreductionMap`]. Must be called after a final [`Self::compact`]
    /// so no tombstones remain.
    pub fn finish(self) -> (Instance, UnreductionMap) {
        debug_assert!(self.sets.iter().all(|s| !s.removed));
        debug_assert!(self.elements.iter().all(|e| !e.removed));

        let element_sets: Vec<Vec<SetId>> =
            self.elements.iter().map(|e| e.sets.clone()).collect();
        let set_elements: Vec<Vec<ElementId>> =
            self.sets.iter().map(|s| s.elements.clone()).collect();

        let (components, element_component, set_component) = Instance::compute_components(
            self.elements.len(),
            self.sets.len(),
            &element_sets,
            &set_elements,
        );

        let elements = element_sets
            .into_iter()
            .zip(element_component)
            .map(|(sets, component)| crate::instance::Element { sets, component })
            .collect();
        let total_cost: Cost = self.sets.iter().map(|s| s.cost).sum();
        let number_of_arcs: usize = self.sets.iter().map(|s| s.elements.len()).sum();
        let sets = self
            .sets
            .iter()
            .zip(set_component)
            .map(|(s, component)| crate::instance::Set {
                cost: s.cost,
                elements: s.elements.clone(),
                component,
                mandatory: false,
            })
            .collect();

        let reduced = Instance::new(elements, sets, components, total_cost, number_of_arcs);
        let unreduction = UnreductionMap::new(self.unreduction, self.mandatory, self.extra_cost);
        (reduced, unreduction)
    }
}
