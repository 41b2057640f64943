//! A 4-ary indexed min-heap over a fixed universe `[0, n)`.
//!
//! Every ID of the universe may be present at most once, each carrying a
//! key of type `K`; the heap root is always the present ID with the
//! smallest key. Besides the usual `push`/`pop`, any present ID's key can
//! be changed in O(log n) via [`IndexedHeap::update`], which is the
//! operation the row-weighting local search and the LNS lean on after
//! every add/remove (scores change for a handful of neighbouring sets,
//! not for the whole universe).

const ARITY: usize = 4;

/// A 4-ary min-heap keyed by `K`, indexed by ID so any present ID's key
/// can be looked up or changed without a linear scan.
#[derive(Debug, Clone)]
pub struct IndexedHeap<K> {
    /// Heap array: `heap[i]` is the ID stored at heap position `i`.
    heap: Vec<usize>,
    /// `position[id]` is the index of `id` in `heap`, if present.
    position: Vec<Option<usize>>,
    /// `key[id]` is the current key of `id`, if present.
    key: Vec<Option<K>>,
}

impl<K: Ord + Clone> IndexedHeap<K> {
    /// Create an empty heap over a universe of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            heap: Vec::with_capacity(n),
            position: vec![None; n],
            key: vec![None; n],
        }
    }

    /// Size of the universe.
    pub fn universe_size(&self) -> usize {
        self.position.len()
    }

    /// Number of IDs currently present in the heap.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// `true` iff `id` is currently present.
    pub fn contains(&self, id: usize) -> bool {
        self.position[id].is_some()
    }

    /// Current key of `id`, if present.
    pub fn key(&self, id: usize) -> Option<&K> {
        self.key[id].as_ref()
    }

    /// Insert `id` with `key`. If already present, updates its key.
    pub fn push(&mut self, id: usize, key: K) {
        if let Some(pos) = self.position[id] {
            self.key[id] = Some(key);
            self.sift(pos);
            return;
        }
        let pos = self.heap.len();
        self.heap.push(id);
        self.position[id] = Some(pos);
        self.key[id] = Some(key);
        self.sift_up(pos);
    }

    /// Change the key of a present `id`. Panics if `id` is not present.
    pub fn update(&mut self, id: usize, key: K) {
        assert!(self.position[id].is_some(), "update of absent heap entry");
        let pos = self.position[id].unwrap();
        self.key[id] = Some(key);
        self.sift(pos);
    }

    /// Root ID and its key, without removing it.
    pub fn peek(&self) -> Option<(usize, &K)> {
        self.heap.first().map(|&id| (id, self.key[id].as_ref().unwrap()))
    }

    /// Remove and return the root ID and its key.
    pub fn pop(&mut self) -> Option<(usize, K)> {
        if self.heap.is_empty() {
            return None;
        }
        let root = self.heap[0];
        let key = self.key[root].take().unwrap();
        self.remove_at(0);
        Some((root, key))
    }

    /// Remove `id` if present, wherever it sits in the heap.
    pub fn remove(&mut self, id: usize) {
        if let Some(pos) = self.position[id] {
            self.key[id] = None;
            self.remove_at(pos);
        }
    }

    fn remove_at(&mut self, pos: usize) {
        let last = self.heap.len() - 1;
        let removed_id = self.heap[pos];
        self.position[removed_id] = None;
        if pos == last {
            self.heap.pop();
            return;
        }
        let moved_id = self.heap[last];
        self.heap[pos] = moved_id;
        self.position[moved_id] = Some(pos);
        self.heap.pop();
        self.sift(pos);
    }

    fn sift(&mut self, pos: usize) {
        let pos = self.sift_up(pos);
        self.sift_down(pos);
    }

    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / ARITY;
            if self.less(pos, parent) {
                self.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
        pos
    }

    fn sift_down(&mut self, mut pos: usize) -> usize {
        loop {
            let first_child = pos * ARITY + 1;
            if first_child >= self.heap.len() {
                break;
            }
            let last_child = (first_child + ARITY).min(self.heap.len());
            let mut smallest = first_child;
            for child in (first_child + 1)..last_child {
                if self.less(child, smallest) {
                    smallest = child;
                }
            }
            if self.less(smallest, pos) {
                self.swap(pos, smallest);
                pos = smallest;
            } else {
                break;
            }
        }
        pos
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        let ida = self.heap[a];
        let idb = self.heap[b];
        self.key[ida] < self.key[idb]
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        let (ida, idb) = (self.heap[a], self.heap[b]);
        self.heap.swap(a, b);
        self.position[ida] = Some(b);
        self.position[idb] = Some(a);
    }
}

#[cfg(test)]
#[path = "../tests_unit/containers/indexed_heap.rs"]
mod tests;
