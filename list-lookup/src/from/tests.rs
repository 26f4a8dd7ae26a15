use {
    crate::{DataStructure, ListLookupDictionary},
    alloc::{vec, vec::Vec},
};

#[test]
fn from_array() {
    let dict: ListLookupDictionary<u32, u32> = [3, 1, 2].into();
    assert_eq!(dict.raw_values(), [3, 1, 2]);
    assert_eq!(dict.index_of_key(&2), Some(2));
    assert_eq!(dict.data_structure(), DataStructure::List);
}

#[test]
fn from_vec() {
    let dict: ListLookupDictionary<u32, u32> = (0..50).collect::<Vec<_>>().into();
    assert_eq!(dict.data_structure(), DataStructure::Hash64k);
    assert_eq!(dict.index_of_key(&49), Some(49));
}

#[test]
fn duplicates_are_not_checked() {
    let dict: ListLookupDictionary<u32, u32> = vec![7, 7, 7].into();
    assert_eq!(dict.len(), 3);
    assert_eq!(dict.index_of_key(&7), Some(0));
}

#[test]
fn into_vec() {
    let dict: ListLookupDictionary<u32, u32> = [1, 2].into();
    let vec: Vec<u32> = dict.into();
    assert_eq!(vec, [1, 2]);
}
