//! The immutable problem graph: elements, sets, costs, connected
//! components, and memoised neighbour adjacencies (spec §3, §4.1).

mod builder;

pub use builder::InstanceBuilder;

use std::sync::OnceLock;

use crate::types::{ComponentId, Cost, ElementId, SetId};

/// An element of the universe.
#[derive(Debug, Clone)]
pub struct Element {
    /// Sets that cover this element, in insertion order.
    pub sets: Vec<SetId>,
    /// Connected component this element belongs to. Always `Some` once
    /// built: the builder rejects elements with no covering set, and
    /// every element therefore shares a component with at least one set.
    pub component: Option<ComponentId>,
}

/// A set of the instance.
#[derive(Debug, Clone)]
pub struct Set {
    /// Nonnegative cost. `1` for every set under the unicost mode.
    pub cost: Cost,
    /// Elements covered by this set, in insertion order.
    pub elements: Vec<ElementId>,
    /// Connected component this set belongs to, or `None` for a set
    /// covering no element (isolated sets belong to no component, per
    /// spec §3's Instance invariants).
    pub component: Option<ComponentId>,
    /// Informational flag: whether an upstream reduction has determined
    /// this set must belong to every feasible solution.
    pub mandatory: bool,
}

/// A connected component of the set/element bipartite incidence graph.
#[derive(Debug, Clone, Default)]
pub struct Component {
    pub elements: Vec<ElementId>,
    pub sets: Vec<SetId>,
}

/// Memoised neighbour adjacencies, computed on demand.
#[derive(Default)]
struct NeighbourCache {
    set_neighbours: OnceLock<Vec<Vec<SetId>>>,
    element_neighbours: OnceLock<Vec<Vec<ElementId>>>,
    element_set_neighbours: OnceLock<Vec<Vec<SetId>>>,
}

impl std::fmt::Debug for NeighbourCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeighbourCache").finish_non_exhaustive()
    }
}

impl Clone for NeighbourCache {
    fn clone(&self) -> Self {
        // Cached adjacencies are derived data; a clone starts empty and
        // recomputes lazily rather than copying (possibly large) vectors.
        Self::default()
    }
}

/// An immutable weighted set covering instance.
///
/// Constructed once via [`InstanceBuilder::build`] and never mutated
/// afterwards; the reduction engine works on a separate, mutable
/// [`crate::reduction::ReductionInstance`] and only materializes a new
/// `Instance` at the end of a round of reduction.
#[derive(Debug, Clone)]
pub struct Instance {
    elements: Vec<Element>,
    sets: Vec<Set>,
    components: Vec<Component>,
    total_cost: Cost,
    number_of_arcs: usize,
    neighbours: NeighbourCache,
}

impl Instance {
    pub(crate) fn new(
        elements: Vec<Element>,
        sets: Vec<Set>,
        components: Vec<Component>,
        total_cost: Cost,
        number_of_arcs: usize,
    ) -> Self {
        Self {
            elements,
            sets,
            components,
            total_cost,
            number_of_arcs,
            neighbours: NeighbourCache::default(),
        }
    }

    pub fn number_of_elements(&self) -> usize {
        self.elements.len()
    }

    pub fn number_of_sets(&self) -> usize {
        self.sets.len()
    }

    pub fn number_of_arcs(&self) -> usize {
        self.number_of_arcs
    }

    pub fn number_of_components(&self) -> usize {
        self.components.len()
    }

    pub fn total_cost(&self) -> Cost {
        self.total_cost
    }

    pub fn element(&self, element_id: ElementId) -> &Element {
        &self.elements[element_id]
    }

    pub fn set(&self, set_id: SetId) -> &Set {
        &self.sets[set_id]
    }

    pub fn component(&self, component_id: ComponentId) -> &Component {
        &self.components[component_id]
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Set IDs sharing at least one element with `set_id`, excluding
    /// `set_id` itself. Computed on first access and memoised.
    pub fn set_neighbours(&self, set_id: SetId) -> &[SetId] {
        &self.neighbours.set_neighbours.get_or_init(|| self.compute_set_neighbours(1))[set_id]
    }

    /// Like [`Instance::set_neighbours`], but forces the initial
    /// computation to shard across `number_of_threads` threads (by set-ID
    /// range, per spec §4.1). Has no effect if the cache is already
    /// populated.
    pub fn precompute_set_neighbours(&self, number_of_threads: usize) {
        self.neighbours
            .set_neighbours
            .get_or_init(|| self.compute_set_neighbours(number_of_threads));
    }

    /// Element IDs sharing at least one set with `element_id`, excluding
    /// `element_id` itself.
    pub fn element_neighbours(&self, element_id: ElementId) -> &[ElementId] {
        &self.neighbours.element_neighbours.get_or_init(|| self.compute_element_neighbours())[element_id]
    }

    /// Set neighbours of any set covering `element_id` (the union of
    /// `set_neighbours(s)` for every `s` covering `element_id`).
    pub fn element_set_neighbours(&self, element_id: ElementId) -> &[SetId] {
        &self
            .neighbours
            .element_set_neighbours
            .get_or_init(|| self.compute_element_set_neighbours())[element_id]
    }

    fn compute_set_neighbours(&self, number_of_threads: usize) -> Vec<Vec<SetId>> {
        let n = self.sets.len();
        if n == 0 {
            return Vec::new();
        }
        let number_of_threads = number_of_threads.max(1).min(n);
        if number_of_threads <= 1 {
            return (0..n).map(|s| self.set_neighbours_of(s)).collect();
        }
        let chunk = n.div_ceil(number_of_threads);
        let mut result: Vec<Vec<SetId>> = vec![Vec::new(); n];
        std::thread::scope(|scope| {
            let mut handles = Vec::new();
            let mut remaining = &mut result[..];
            let mut start = 0;
            while start < n {
                let end = (start + chunk).min(n);
                let (chunk_slice, rest) = remaining.split_at_mut(end - start);
                remaining = rest;
                let this = &*self;
                handles.push(scope.spawn(move || {
                    for (offset, slot) in chunk_slice.iter_mut().enumerate() {
                        *slot = this.set_neighbours_of(start + offset);
                    }
                }));
                start = end;
            }
            for handle in handles {
                handle.join().expect("neighbour precompute worker panicked");
            }
        });
        result
    }

    fn set_neighbours_of(&self, set_id: SetId) -> Vec<SetId> {
        let mut seen = vec![false; self.sets.len()];
        let mut out = Vec::new();
        for &element_id in &self.sets[set_id].elements {
            for &other in &self.elements[element_id].sets {
                if other != set_id && !seen[other] {
                    seen[other] = true;
                    out.push(other);
                }
            }
        }
        out
    }

    fn compute_element_neighbours(&self) -> Vec<Vec<ElementId>> {
        (0..self.elements.len())
            .map(|e| {
                let mut seen = vec![false; self.elements.len()];
                let mut out = Vec::new();
                for &set_id in &self.elements[e].sets {
                    for &other in &self.sets[set_id].elements {
                        if other != e && !seen[other] {
                            seen[other] = true;
                            out.push(other);
                        }
                    }
                }
                out
            })
            .collect()
    }

    fn compute_element_set_neighbours(&self) -> Vec<Vec<SetId>> {
        (0..self.elements.len())
            .map(|e| {
                let mut seen = vec![false; self.sets.len()];
                let mut out = Vec::new();
                for &set_id in &self.elements[e].sets {
                    out.push(set_id);
                    seen[set_id] = true;
                    for &neighbour in self.set_neighbours(set_id) {
                        if !seen[neighbour] {
                            seen[neighbour] = true;
                            out.push(neighbour);
                        }
                    }
                }
                out
            })
            .collect()
    }

    /// Recompute connected components via flood fill over the bipartite
    /// incidence graph (spec §4.1). Returns the components and, for each
    /// element/set, its component index, without mutating `self` — used
    /// both by the builder and by the reduction engine's compaction pass.
    pub(crate) fn compute_components(
        number_of_elements: usize,
        number_of_sets: usize,
        element_sets: &[Vec<SetId>],
        set_elements: &[Vec<ElementId>],
    ) -> (Vec<Component>, Vec<Option<ComponentId>>, Vec<Option<ComponentId>>) {
        let mut element_component: Vec<Option<ComponentId>> = vec![None; number_of_elements];
        let mut set_component: Vec<Option<ComponentId>> = vec![None; number_of_sets];
        let mut components = Vec::new();

        for start in 0..number_of_elements {
            if element_component[start].is_some() {
                continue;
            }
            let component_id = components.len();
            let mut component = Component::default();
            let mut stack = vec![start];
            element_component[start] = Some(component_id);
            while let Some(element_id) = stack.pop() {
                component.elements.push(element_id);
                for &set_id in &element_sets[element_id] {
                    if set_component[set_id].is_none() {
                        set_component[set_id] = Some(component_id);
                        component.sets.push(set_id);
                        for &other_element in &set_elements[set_id] {
                            if element_component[other_element].is_none() {
                                element_component[other_element] = Some(component_id);
                                stack.push(other_element);
                            }
                        }
                    }
                }
            }
            components.push(component);
        }

        (components, element_component, set_component)
    }
}

#[cfg(test)]
#[path = "../tests_unit/instance/mod.rs"]
mod tests;
