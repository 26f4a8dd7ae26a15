use crate::{FnKey, HasKey, HasKeyPolicy, KeyPolicy, PairKey, SelfKey};

#[derive(Debug, PartialEq)]
struct Named {
    name: u32,
}

impl HasKey<u32> for Named {
    fn key(&self) -> &u32 {
        &self.name
    }

    fn from_key(key: &u32) -> Option<Self> {
        Some(Named { name: *key })
    }
}

fn even(v: &u32) -> Option<&u32> {
    (*v % 2 == 0).then_some(v)
}

#[test]
fn self_key() {
    assert_eq!(KeyPolicy::<u32, u32>::key(&SelfKey, &4), Some(&4));
    assert_eq!(KeyPolicy::<u32, u32>::create_from_key(&SelfKey, &4), Some(4));
    assert!(KeyPolicy::<u32, u32>::key_eq(&SelfKey, &1, &1));
    assert!(!KeyPolicy::<u32, u32>::value_eq(&SelfKey, &1, &2));
}

#[test]
fn pair_key() {
    let value = (3u32, "three");
    assert_eq!(PairKey.key(&value), Some(&3));
    assert_eq!(KeyPolicy::<u32, (u32, &str)>::create_from_key(&PairKey, &3), None);
}

#[test]
fn has_key() {
    let value = Named { name: 9 };
    assert_eq!(HasKeyPolicy.key(&value), Some(&9));
    assert_eq!(
        KeyPolicy::<u32, Named>::create_from_key(&HasKeyPolicy, &2),
        Some(Named { name: 2 }),
    );
}

#[test]
fn fn_key() {
    let policy = FnKey::new(even);
    assert_eq!(policy.key(&4), Some(&4));
    assert_eq!(policy.key(&5), None);
}

#[test]
fn hash_key_is_consistent() {
    let hasher = hashbrown::DefaultHashBuilder::default();
    let a = KeyPolicy::<u32, u32>::hash_key(&SelfKey, &hasher, &17);
    let b = KeyPolicy::<u32, u32>::hash_key(&SelfKey, &hasher, &17);
    assert_eq!(a, b);
}
