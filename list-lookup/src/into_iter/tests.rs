use {
    crate::ListLookupDictionary,
    alloc::{string::String, vec::Vec},
};

#[test]
fn into_iter() {
    let dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    assert_eq!(dict.into_iter().collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn drops_hidden() {
    let mut dict: ListLookupDictionary<String, String> =
        ["a", "b", "c", "d"].map(String::from).into();
    dict.hide_at(0).unwrap();
    dict.hide_at(2).unwrap();
    let mut iter = dict.into_iter();
    assert_eq!(iter.size_hint(), (0, Some(4)));
    assert_eq!(iter.next_back().as_deref(), Some("d"));
    assert_eq!(iter.next().as_deref(), Some("b"));
    assert_eq!(iter.next(), None);
}

#[test]
fn into_vec_keeps_hidden() {
    let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    dict.hide_at(1).unwrap();
    assert_eq!(dict.into_vec(), [1, 2, 3]);
}
