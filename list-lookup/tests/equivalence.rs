use {
    list_lookup::{DataStructure, Error, ListLookupDictionary, Options, PairKey},
    proptest::prelude::*,
};

type Dict = ListLookupDictionary<u8, (u8, u16), PairKey>;

#[derive(Clone, Debug)]
enum Op {
    Add(u8, u16),
    Insert(usize, u8),
    RemoveAt(usize),
    RemoveRange(usize, usize),
    RemoveKey(u8),
    RemoveAll(u8),
    Set(usize, u8),
    Hide(usize),
    Unhide(usize, bool),
    Retain(u8),
    Clear,
}

/// Operations on keys in `0..=max_key`.
fn op(max_key: u8) -> impl Strategy<Value = Op> {
    let key = move || 0..=max_key;
    prop_oneof![
        8 => (key(), any::<u16>()).prop_map(|(k, v)| Op::Add(k, v)),
        2 => (0..80usize, key()).prop_map(|(i, k)| Op::Insert(i, k)),
        3 => (0..80usize).prop_map(Op::RemoveAt),
        1 => (0..80usize, 0..10usize).prop_map(|(i, n)| Op::RemoveRange(i, n)),
        2 => key().prop_map(Op::RemoveKey),
        1 => key().prop_map(Op::RemoveAll),
        2 => (0..80usize, key()).prop_map(|(i, k)| Op::Set(i, k)),
        2 => (0..80usize).prop_map(Op::Hide),
        2 => (0..80usize, any::<bool>()).prop_map(|(i, r)| Op::Unhide(i, r)),
        1 => (2..6u8).prop_map(Op::Retain),
        1 => Just(Op::Clear),
    ]
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Done,
    Index(usize),
    Value(Option<(u8, u16)>),
    Changed(bool),
    Count(usize),
    Failed(Error),
}

fn apply(dict: &mut Dict, op: &Op) -> Outcome {
    fn outcome<T>(res: Result<T, Error>, f: impl FnOnce(T) -> Outcome) -> Outcome {
        match res {
            Ok(v) => f(v),
            Err(e) => Outcome::Failed(e),
        }
    }
    match *op {
        Op::Add(k, v) => outcome(dict.add((k, v)), Outcome::Index),
        Op::Insert(i, k) => outcome(dict.insert(i, (k, 0)), |_| Outcome::Done),
        Op::RemoveAt(i) => outcome(dict.remove_at(i), |v| Outcome::Value(Some(v))),
        Op::RemoveRange(i, n) => outcome(dict.remove_range(i, n), |_| Outcome::Done),
        Op::RemoveKey(k) => Outcome::Value(dict.remove(&k)),
        Op::RemoveAll(k) => Outcome::Count(dict.remove_all_values(&k)),
        Op::Set(i, k) => outcome(dict.set(i, (k, 1)), |v| Outcome::Value(Some(v))),
        Op::Hide(i) => outcome(dict.hide_at(i), Outcome::Changed),
        Op::Unhide(i, r) => outcome(dict.unhide_at(i, r), Outcome::Changed),
        Op::Retain(m) => Outcome::Count(dict.retain(|v| v.0 % m != 0)),
        Op::Clear => {
            dict.clear();
            Outcome::Done
        }
    }
}

fn dict(data_structure: DataStructure) -> Dict {
    dict_with(Options::new().data_structure(data_structure))
}

fn dict_with(options: Options) -> Dict {
    Dict::with_options_and_policy(options, PairKey).unwrap()
}

fn assert_same(a: &Dict, b: &Dict) {
    assert_eq!(a.raw_values(), b.raw_values());
    assert_eq!(a, b);
    for k in 0..=u8::MAX {
        assert_eq!(a.index_of_key(&k), b.index_of_key(&k), "key {k}");
        let ia: Vec<_> = a.get_values(&k).map(|(i, _)| i).collect();
        let ib: Vec<_> = b.get_values(&k).map(|(i, _)| i).collect();
        assert_eq!(ia, ib, "key {k}");
    }
    let mut ka: Vec<_> = a.distinct_keys().copied().collect();
    let mut kb: Vec<_> = b.distinct_keys().copied().collect();
    ka.sort_unstable();
    kb.sort_unstable();
    assert_eq!(ka, kb);
}

proptest! {
    #[test]
    fn list_and_hash_agree(ops in prop::collection::vec(op(u8::MAX), 0..300)) {
        let mut list = dict(DataStructure::List);
        let mut hash = dict(DataStructure::Hash64k);
        let mut auto = dict(DataStructure::Auto);
        for op in &ops {
            let expected = apply(&mut list, op);
            prop_assert_eq!(&apply(&mut hash, op), &expected, "{:?}", op);
            prop_assert_eq!(&apply(&mut auto, op), &expected, "{:?}", op);
        }
        assert_same(&list, &hash);
        assert_same(&list, &auto);
        prop_assert_eq!(list.data_structure(), DataStructure::List);
        prop_assert_eq!(hash.data_structure(), DataStructure::Hash64k);
    }

    #[test]
    fn list_and_hash_agree_with_duplicate_keys(ops in prop::collection::vec(op(12), 0..300)) {
        let options = Options::new().non_unique();
        let mut list = dict_with(options.data_structure(DataStructure::List));
        let mut hash = dict_with(options.data_structure(DataStructure::Hash64k));
        let mut auto = dict_with(options);
        for op in &ops {
            let expected = apply(&mut list, op);
            prop_assert_eq!(&apply(&mut hash, op), &expected, "{:?}", op);
            prop_assert_eq!(&apply(&mut auto, op), &expected, "{:?}", op);
        }
        assert_same(&list, &hash);
        assert_same(&list, &auto);
    }

    #[test]
    fn rebuild_keeps_lookups(keys in prop::collection::hash_set(any::<u8>(), 0..200)) {
        let mut dict = dict(DataStructure::Auto);
        for &k in &keys {
            dict.add((k, k as u16)).unwrap();
        }
        let copy: Dict = dict.raw_values().to_vec().into();
        for &k in &keys {
            prop_assert_eq!(copy.index_of_key(&k), dict.index_of_key(&k));
        }
    }

    #[test]
    fn duplicates_are_rejected(keys in prop::collection::vec(0..20u8, 0..100)) {
        let mut dict = dict(DataStructure::Auto);
        for &k in &keys {
            let len = dict.len();
            match dict.add((k, 0)) {
                Ok(index) => prop_assert_eq!(index, len),
                Err(Error::DuplicateKey { index }) => {
                    prop_assert_eq!(dict[index].0, k);
                    prop_assert_eq!(dict.len(), len);
                }
                Err(e) => panic!("{e}"),
            }
        }
        let mut seen: Vec<_> = dict.values().map(|v| v.0).collect();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), dict.len());
    }

    #[test]
    fn live_index_follows_removals(len in 1..100usize, at in 0..100usize, removals in prop::collection::vec(0..100usize, 0..20)) {
        let at = at % len;
        let mut dict = dict(DataStructure::Auto);
        for k in 0..len {
            dict.add((k as u8, k as u16)).unwrap();
        }
        let handle = dict.open_live_index(at).unwrap();
        let mut expected = Some(at);
        for r in removals {
            if dict.is_empty() {
                break;
            }
            let r = r % dict.len();
            dict.remove_range(r, 1).unwrap();
            expected = match expected {
                Some(e) if e == r => None,
                Some(e) if e > r => Some(e - 1),
                e => e,
            };
        }
        prop_assert_eq!(handle.index(), expected);
        if expected.is_some() {
            prop_assert_eq!(handle.value(&dict).map(|v| v.1 as usize), Some(at));
        }
    }
}
