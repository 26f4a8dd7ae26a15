
use {
    crate::{key::KeyPolicy, ListLookupDictionary},
    alloc::vec::Vec,
    core::hash::{BuildHasher, Hash},
};

/// Collects values without checking keys.
///
/// # Panics
///
/// Panics if there are more elements than [`HASH64K_MAX`](crate::HASH64K_MAX).
impl<K, V, P, S> FromIterator<V> for ListLookupDictionary<K, V, P, S>
where
    K: Eq + Hash,
    P: KeyPolicy<K, V> + Default,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}
