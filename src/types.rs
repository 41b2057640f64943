//! Identifier and numeric types shared across the set covering toolbox.

/// Identifier of an element of the universe, in `[0, number_of_elements)`.
pub type ElementId = usize;

/// Identifier of a set of the instance, in `[0, number_of_sets)`.
pub type SetId = usize;

/// Identifier of a connected component of the incidence bipartite graph.
pub type ComponentId = usize;

/// Cost of a set. Fits a 64-bit signed integer per the problem's scope.
pub type Cost = i64;

/// Row-weighting penalty attached to an element.
pub type Penalty = i64;

/// Generic iteration/timestamp counter.
pub type Counter = i64;

/// Seed for a sub-generator, deterministically derived from a parent seed.
pub type Seed = u64;

#[cfg(test)]
#[path = "tests_unit/types.rs"]
mod tests;
