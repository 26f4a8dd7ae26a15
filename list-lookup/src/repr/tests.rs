use {
    crate::{
        options::DataStructure,
        repr::{Hash64k, ListRepr, Repr, Strategy},
        store::KeySource,
    },
    alloc::{vec, vec::Vec},
};

/// Keys hash to themselves so that collisions can be provoked deliberately.
#[derive(Default)]
struct TestKeys {
    values: Vec<u32>,
    hidden: Vec<bool>,
}

impl TestKeys {
    fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            hidden: vec![false; values.len()],
        }
    }
}

impl KeySource<u32> for TestKeys {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn key(&self, index: usize) -> Option<&u32> {
        Some(&self.values[index])
    }

    fn is_hidden(&self, index: usize) -> bool {
        self.hidden[index]
    }

    fn hash(&self, key: &u32) -> u64 {
        *key as u64
    }

    fn key_eq(&self, a: &u32, b: &u32) -> bool {
        a == b
    }
}

fn all_matches<R: Strategy>(repr: &R, keys: &TestKeys, key: u32) -> Vec<usize> {
    let mut probe = repr.first_probe(keys, &key);
    let mut res = Vec::new();
    while let Some(i) = repr.next_match(keys, &key, &mut probe) {
        res.push(i);
    }
    res
}

#[test]
fn list_scans_in_array_order() {
    let mut keys = TestKeys::new(&[4, 1, 4, 2, 4]);
    let repr = ListRepr;
    assert_eq!(all_matches(&repr, &keys, 4), [0, 2, 4]);
    assert!(all_matches(&repr, &keys, 3).is_empty());
    keys.hidden[2] = true;
    assert_eq!(all_matches(&repr, &keys, 4), [0, 4]);
}

#[test]
fn hash_rebuild_orders_chains() {
    // 3 buckets: 0, 3 and 6 collide.
    let keys = TestKeys::new(&[0, 3, 6, 1, 3]);
    let mut hash = Hash64k::default();
    hash.rebuild(&keys, 0);
    assert_eq!(hash.bucket_count(), 7);
    assert_eq!(all_matches(&hash, &keys, 3), [1, 4]);
    assert_eq!(all_matches(&hash, &keys, 6), [2]);
    assert!(all_matches(&hash, &keys, 5).is_empty());
}

#[test]
fn hash_collisions() {
    let mut keys = TestKeys::new(&[]);
    let mut hash = Hash64k::default();
    hash.rebuild(&keys, 3);
    assert_eq!(hash.bucket_count(), 3);
    for (i, k) in [0, 3, 6].into_iter().enumerate() {
        keys.values.push(k);
        keys.hidden.push(false);
        hash.link(&keys, i);
    }
    assert_eq!(all_matches(&hash, &keys, 0), [0]);
    assert_eq!(all_matches(&hash, &keys, 3), [1]);
    assert_eq!(all_matches(&hash, &keys, 6), [2]);
    // Unlink the middle of a chain.
    hash.unlink(&keys, 1);
    assert!(all_matches(&hash, &keys, 3).is_empty());
    assert_eq!(all_matches(&hash, &keys, 0), [0]);
    assert_eq!(all_matches(&hash, &keys, 6), [2]);
}

#[test]
fn hash_grows() {
    let mut keys = TestKeys::new(&[]);
    let mut hash = Hash64k::default();
    hash.rebuild(&keys, 0);
    for i in 0..100u32 {
        keys.values.push(i * 3);
        keys.hidden.push(false);
        hash.link(&keys, i as usize);
    }
    assert!(hash.bucket_count() >= 100);
    for i in 0..100u32 {
        assert_eq!(all_matches(&hash, &keys, i * 3), [i as usize]);
    }
}

#[test]
fn hash_skips_hidden() {
    let mut keys = TestKeys::new(&[1, 2, 1]);
    let mut hash = Hash64k::default();
    hash.rebuild(&keys, 0);
    keys.hidden[0] = true;
    assert_eq!(all_matches(&hash, &keys, 1), [2]);
    hash.rebuild(&keys, 0);
    // Hidden slots are not linked, so changing the key is harmless.
    keys.values[0] = 2;
    assert_eq!(all_matches(&hash, &keys, 2), [1]);
    keys.hidden[0] = false;
    hash.link(&keys, 0);
    assert_eq!(all_matches(&hash, &keys, 2), [0, 1]);
    assert_eq!(all_matches(&hash, &keys, 1), [2]);
}

#[test]
fn hash_swap_remove() {
    let mut keys = TestKeys::new(&[10, 20, 30, 40]);
    let mut hash = Hash64k::default();
    hash.rebuild(&keys, 0);
    hash.unlink(&keys, 1);
    hash.unlink(&keys, 3);
    keys.values.swap_remove(1);
    keys.hidden.swap_remove(1);
    hash.truncate(3);
    hash.link(&keys, 1);
    assert!(all_matches(&hash, &keys, 20).is_empty());
    assert_eq!(all_matches(&hash, &keys, 40), [1]);
    assert_eq!(all_matches(&hash, &keys, 10), [0]);
    assert_eq!(all_matches(&hash, &keys, 30), [2]);
}

#[test]
fn repr_build() {
    let keys = TestKeys::new(&[1, 2, 3]);
    let list = Repr::build(DataStructure::List, &keys, 0);
    assert_eq!(list.kind(), DataStructure::List);
    assert_eq!(list.find(&keys, &2), Some(1));
    let hash = Repr::build(DataStructure::Hash64k, &keys, 0);
    assert_eq!(hash.kind(), DataStructure::Hash64k);
    assert_eq!(hash.find(&keys, &2), Some(1));
    assert_eq!(hash.find(&keys, &4), None);
}

#[test]
fn hash_links_keep_chains_ascending() {
    let mut keys = TestKeys::new(&[]);
    let mut hash = Hash64k::default();
    hash.rebuild(&keys, 3);
    // All of these land in bucket 0.
    for (i, k) in [3, 0, 3, 6, 3].into_iter().enumerate() {
        keys.values.push(k);
        keys.hidden.push(false);
        hash.link(&keys, i);
    }
    assert_eq!(all_matches(&hash, &keys, 3), [0, 2, 4]);
    hash.unlink(&keys, 2);
    hash.unlink(&keys, 0);
    assert_eq!(all_matches(&hash, &keys, 3), [4]);
    hash.link(&keys, 2);
    hash.link(&keys, 0);
    assert_eq!(all_matches(&hash, &keys, 3), [0, 2, 4]);
    assert_eq!(all_matches(&hash, &keys, 6), [3]);
}
