use super::*;

#[test]
fn new_set_starts_empty() {
    let set = IndexedSet::new(5);
    assert_eq!(set.len(), 0);
    assert!(set.is_empty());
    assert_eq!(set.absent().len(), 5);
}

#[test]
fn new_full_set_starts_full() {
    let set = IndexedSet::new_full(5);
    assert_eq!(set.len(), 5);
    assert_eq!(set.present().len(), 5);
}

#[test]
fn add_and_remove_round_trip() {
    let mut set = IndexedSet::new(4);
    set.add(2);
    assert!(set.contains(2));
    assert_eq!(set.len(), 1);
    set.add(2); // no-op
    assert_eq!(set.len(), 1);
    set.remove(2);
    assert!(!set.contains(2));
    assert_eq!(set.len(), 0);
    set.remove(2); // no-op
    assert_eq!(set.len(), 0);
}

#[test]
fn present_and_absent_partition_the_universe() {
    let mut set = IndexedSet::new(6);
    for id in [0, 2, 4] {
        set.add(id);
    }
    let mut present: Vec<usize> = set.present().to_vec();
    let mut absent: Vec<usize> = set.absent().to_vec();
    present.sort_unstable();
    absent.sort_unstable();
    assert_eq!(present, vec![0, 2, 4]);
    assert_eq!(absent, vec![1, 3, 5]);
}

#[test]
fn clear_and_fill() {
    let mut set = IndexedSet::new(3);
    set.fill();
    assert_eq!(set.len(), 3);
    set.clear();
    assert_eq!(set.len(), 0);
}
