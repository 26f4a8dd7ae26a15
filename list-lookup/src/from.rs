#[cfg(test)]
mod tests;

use {
    crate::{key::KeyPolicy, options::Options, ListLookupDictionary},
    alloc::vec::Vec,
    core::hash::{BuildHasher, Hash},
};

/// Takes ownership of the array without checking keys.
///
/// # Panics
///
/// Panics if there are more elements than [`HASH64K_MAX`](crate::HASH64K_MAX). Use
/// [`from_values`](ListLookupDictionary::from_values) to handle this case.
impl<K, V, P, S> From<Vec<V>> for ListLookupDictionary<K, V, P, S>
where
    K: Eq + Hash,
    P: KeyPolicy<K, V> + Default,
    S: BuildHasher + Default,
{
    fn from(values: Vec<V>) -> Self {
        match Self::from_values(values, Options::new(), P::default(), S::default()) {
            Ok(dict) => dict,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<K, V, P, S, const N: usize> From<[V; N]> for ListLookupDictionary<K, V, P, S>
where
    K: Eq + Hash,
    P: KeyPolicy<K, V> + Default,
    S: BuildHasher + Default,
{
    fn from(values: [V; N]) -> Self {
        Vec::from(values).into()
    }
}

impl<K, V, P, S> From<ListLookupDictionary<K, V, P, S>> for Vec<V> {
    fn from(dict: ListLookupDictionary<K, V, P, S>) -> Self {
        dict.into_vec()
    }
}
