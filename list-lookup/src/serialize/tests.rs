use {
    crate::{ListLookupDictionary, PairKey},
    alloc::string::String,
    serde_json::json,
};

#[test]
fn test() {
    let mut dict1: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    dict1.remove_at(0).unwrap();
    let value = serde_json::to_value(&dict1).unwrap();
    assert_eq!(value, json!([3, 2]));
    let dict2: ListLookupDictionary<u32, u32> = serde_json::from_value(value).unwrap();
    assert_eq!(dict1, dict2);
    assert_eq!(dict2.index_of_key(&2), Some(1));
}

#[test]
fn hidden_elements_become_visible() {
    let mut dict1: ListLookupDictionary<u32, u32> = [1, 2].into();
    dict1.hide_at(0).unwrap();
    let dict2: ListLookupDictionary<u32, u32> =
        serde_json::from_str(&serde_json::to_string(&dict1).unwrap()).unwrap();
    assert_eq!(dict2.raw_values(), [1, 2]);
    assert!(dict2.contains_key(&1));
}

#[test]
fn pairs() {
    let dict: ListLookupDictionary<String, (String, u32), PairKey> =
        serde_json::from_value(json!([["a", 1], ["b", 2]])).unwrap();
    assert_eq!(dict.get(&String::from("b")), Some(&(String::from("b"), 2)));
}
