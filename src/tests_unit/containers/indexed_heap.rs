use super::*;

#[test]
fn pop_returns_ascending_keys() {
    let mut heap: IndexedHeap<i32> = IndexedHeap::new(5);
    heap.push(0, 30);
    heap.push(1, 10);
    heap.push(2, 20);
    heap.push(3, 5);
    heap.push(4, 15);

    let mut popped = Vec::new();
    while let Some((id, key)) = heap.pop() {
        popped.push((id, key));
    }
    let keys: Vec<i32> = popped.iter().map(|&(_, k)| k).collect();
    assert_eq!(keys, vec![5, 10, 15, 20, 30]);
}

#[test]
fn update_reorders_in_place() {
    let mut heap: IndexedHeap<i32> = IndexedHeap::new(3);
    heap.push(0, 10);
    heap.push(1, 20);
    heap.push(2, 30);
    assert_eq!(heap.peek().map(|(id, _)| id), Some(0));

    heap.update(2, 1);
    assert_eq!(heap.peek().map(|(id, _)| id), Some(2));
    assert_eq!(heap.key(2), Some(&1));
}

#[test]
fn push_on_present_id_updates_rather_than_duplicates() {
    let mut heap: IndexedHeap<i32> = IndexedHeap::new(3);
    heap.push(0, 10);
    heap.push(0, 2);
    assert_eq!(heap.len(), 1);
    assert_eq!(heap.key(0), Some(&2));
}

#[test]
fn remove_drops_an_arbitrary_entry() {
    let mut heap: IndexedHeap<i32> = IndexedHeap::new(4);
    heap.push(0, 1);
    heap.push(1, 2);
    heap.push(2, 3);
    heap.remove(1);
    assert!(!heap.contains(1));
    assert_eq!(heap.len(), 2);
    // The remaining two still pop out in order.
    assert_eq!(heap.pop().map(|(id, _)| id), Some(0));
    assert_eq!(heap.pop().map(|(id, _)| id), Some(2));
}

#[test]
fn empty_heap_pops_none() {
    let mut heap: IndexedHeap<i32> = IndexedHeap::new(2);
    assert_eq!(heap.pop(), None);
    assert!(heap.is_empty());
}

#[test]
fn arity_four_holds_under_many_random_like_insertions() {
    let mut heap: IndexedHeap<i32> = IndexedHeap::new(50);
    // Deterministic pseudo-random permutation via a simple LCG, to avoid
    // pulling in `rand` for a container-level structural test.
    let mut state: u64 = 12345;
    let mut keys = Vec::new();
    for id in 0..50 {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let key = (state >> 33) as i32 % 1000;
        heap.push(id, key);
        keys.push(key);
    }
    keys.sort_unstable();

    let mut popped = Vec::new();
    while let Some((_, key)) = heap.pop() {
        popped.push(key);
    }
    assert_eq!(popped, keys);
}
