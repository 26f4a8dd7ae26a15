
use {
    crate::{
        key::KeyPolicy,
        repr::{Repr, Strategy},
        store::Store,
        ListLookupDictionary,
    },
    core::{
        fmt::{Debug, Formatter},
        hash::{BuildHasher, Hash},
        iter::FusedIterator,
    },
};

/// An iterator over all visible elements with a given key.
/// The iterator element type is `(usize, &'a V)`.
///
/// Elements are yielded in ascending index order with every data structure.
///
/// This `struct` is created by the [`get_values`] method on [`ListLookupDictionary`].
///
/// [`get_values`]: crate::ListLookupDictionary::get_values
/// [`ListLookupDictionary`]: crate::ListLookupDictionary
pub struct Lookup<'a, K, V, P, S> {
    store: &'a Store<K, V, P, S>,
    repr: &'a Repr,
    key: &'a K,
    probe: usize,
}

impl<'a, K, V, P, S> Lookup<'a, K, V, P, S>
where
    K: Eq + Hash,
    P: KeyPolicy<K, V>,
    S: BuildHasher,
{
    pub(crate) fn new(dict: &'a ListLookupDictionary<K, V, P, S>, key: &'a K) -> Self {
        Self {
            store: &dict.store,
            repr: &dict.repr,
            key,
            probe: dict.repr.first_probe(&dict.store, key),
        }
    }
}

impl<'a, K, V, P, S> Iterator for Lookup<'a, K, V, P, S>
where
    K: Eq + Hash,
    P: KeyPolicy<K, V>,
    S: BuildHasher,
{
    type Item = (usize, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.repr.next_match(self.store, self.key, &mut self.probe)?;
        Some((index, &self.store.values[index]))
    }
}

impl<K, V, P, S> Clone for Lookup<'_, K, V, P, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            repr: self.repr,
            key: self.key,
            probe: self.probe,
        }
    }
}

impl<K, V, P, S> Debug for Lookup<'_, K, V, P, S>
where
    K: Eq + Hash,
    V: Debug,
    P: KeyPolicy<K, V>,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V, P, S> FusedIterator for Lookup<'_, K, V, P, S>
where
    K: Eq + Hash,
    P: KeyPolicy<K, V>,
    S: BuildHasher,
{
}
