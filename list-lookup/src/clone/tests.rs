use {
    crate::{DataStructure, Error, ListLookupDictionary, Options},
    alloc::{sync::Arc, vec::Vec},
    core::sync::atomic::{AtomicUsize, Ordering::Relaxed},
};

#[test]
fn clone() {
    let mut dict: ListLookupDictionary<u32, u32> = (0..40).collect();
    dict.hide_at(3).unwrap();
    dict.remove_at(0).unwrap();
    let copy = dict.clone();
    assert_eq!(copy, dict);
    assert_eq!(copy.version(), 0);
    assert_eq!(copy.data_structure(), DataStructure::Hash64k);
    assert!(copy.is_hidden(3));
    for v in 1..40 {
        assert_eq!(copy.index_of_key(&v), dict.index_of_key(&v));
    }
}

#[test]
fn clone_is_independent() {
    let dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    let mut copy = dict.clone();
    copy.add(4).unwrap();
    assert_eq!(dict.len(), 3);
    assert!(!dict.contains_key(&4));
    assert!(copy.contains_key(&4));
}

#[test]
fn observers_are_carried() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    let calls2 = calls.clone();
    dict.subscribe(move |_| {
        calls2.fetch_add(1, Relaxed);
    });
    let mut copy = dict.clone();
    copy.remove_range(0, 1).unwrap();
    assert_eq!(calls.load(Relaxed), 2);
    let mut bare = dict.clone_with(None, false).unwrap();
    bare.remove_range(0, 1).unwrap();
    assert_eq!(calls.load(Relaxed), 2);
}

#[test]
fn live_indices_are_not_carried() {
    let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    let handle = dict.open_live_index(1).unwrap();
    let mut copy = dict.clone();
    assert_eq!(copy.live_index_count(), 0);
    assert_eq!(handle.value(&copy), None);
    assert_eq!(copy.close_live_index(&handle), Err(Error::Ownership));
    copy.remove_range(0, 1).unwrap();
    assert_eq!(handle.index(), Some(1));
}

#[test]
fn clone_with_options() {
    let dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    let options = Options::new()
        .non_unique()
        .data_structure(DataStructure::Hash64k);
    let mut copy = dict.clone_with(Some(options), true).unwrap();
    assert_eq!(copy.data_structure(), DataStructure::Hash64k);
    copy.add(1).unwrap();
    assert_eq!(copy.get_values(&1).count(), 2);
    let hash = Options::new().data_structure(DataStructure::Hash);
    assert!(dict.clone_with(Some(hash), true).is_err());
    let values: Vec<_> = copy.values().copied().collect();
    assert_eq!(values, [1, 2, 3, 1]);
}

#[test]
fn carried_observers_start_without_live_indices() {
    let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    dict.subscribe(|_| {});
    let original = dict.open_live_index(2).unwrap();
    let mut copy = dict.clone_with(None, true).unwrap();
    assert_eq!(copy.live_index_count(), 0);
    let handle = copy.open_live_index(2).unwrap();
    copy.remove_range(0, 1).unwrap();
    assert_eq!(handle.index(), Some(1));
    assert_eq!(original.index(), Some(2));
    drop(copy);
    assert!(handle.is_closed());
    assert_eq!(original.value(&dict), Some(&3));
}
