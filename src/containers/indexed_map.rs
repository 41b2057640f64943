//! An indexed map over a fixed universe `[0, n)` with O(1) iteration over
//! the subset of keys currently holding a non-default value.
//!
//! Used for per-element cover counts: most of the time only a minority of
//! elements have an interesting (non-zero) count, and the local search and
//! LNS loops repeatedly need "all currently uncovered elements" or "all
//! currently covered elements" without scanning the whole universe.

use super::indexed_set::IndexedSet;

/// A dense `id -> value` map over `[0, n)` that tracks, alongside the
/// values, which keys are currently non-default.
#[derive(Debug, Clone)]
pub struct IndexedMap<V> {
    values: Vec<V>,
    non_default: IndexedSet,
    default: V,
}

impl<V: Clone + PartialEq> IndexedMap<V> {
    /// Create a map over `[0, n)` with every key initially set to `default`.
    pub fn new(n: usize, default: V) -> Self {
        Self {
            values: vec![default.clone(); n],
            non_default: IndexedSet::new(n),
            default,
        }
    }

    /// Size of the universe.
    pub fn universe_size(&self) -> usize {
        self.values.len()
    }

    /// Number of keys currently holding a non-default value.
    pub fn len(&self) -> usize {
        self.non_default.len()
    }

    /// `true` iff every key holds the default value.
    pub fn is_empty(&self) -> bool {
        self.non_default.is_empty()
    }

    /// Current value of `id`.
    #[inline]
    pub fn get(&self, id: usize) -> &V {
        &self.values[id]
    }

    /// Set the value of `id`, updating the non-default partition.
    #[inline]
    pub fn set(&mut self, id: usize, value: V) {
        if value == self.default {
            self.non_default.remove(id);
        } else {
            self.non_default.add(id);
        }
        self.values[id] = value;
    }

    /// IDs currently holding a non-default value.
    pub fn present(&self) -> &[usize] {
        self.non_default.present()
    }

    /// IDs currently holding the default value.
    pub fn absent(&self) -> &[usize] {
        self.non_default.absent()
    }

    /// Reset every key to the default value.
    pub fn clear(&mut self) {
        for &id in self.non_default.present().to_vec().iter() {
            self.values[id] = self.default.clone();
        }
        self.non_default.clear();
    }
}

#[cfg(test)]
#[path = "../tests_unit/containers/indexed_map.rs"]
mod tests;
