use super::*;

#[test]
fn unset_keys_read_as_default() {
    let map: IndexedMap<i64> = IndexedMap::new(5, 0);
    assert_eq!(*map.get(3), 0);
    assert!(map.is_empty());
}

#[test]
fn set_tracks_non_default_partition() {
    let mut map: IndexedMap<i64> = IndexedMap::new(5, 0);
    map.set(1, 7);
    assert_eq!(*map.get(1), 7);
    assert_eq!(map.len(), 1);
    assert_eq!(map.present(), &[1]);

    map.set(1, 0); // back to default removes it from `present`
    assert_eq!(map.len(), 0);
}

#[test]
fn clear_resets_every_non_default_key() {
    let mut map: IndexedMap<i64> = IndexedMap::new(4, -1);
    map.set(0, 5);
    map.set(2, 9);
    map.clear();
    assert_eq!(*map.get(0), -1);
    assert_eq!(*map.get(2), -1);
    assert!(map.is_empty());
}
