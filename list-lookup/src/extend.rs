
use {
    crate::{key::KeyPolicy, ListLookupDictionary},
    core::hash::{BuildHasher, Hash},
};

/// Appends values without checking their keys, like the sequence constructor.
///
/// # Panics
///
/// Panics if the collection would grow beyond the data structure's capacity. Use
/// [`add_range`](ListLookupDictionary::add_range) for checked insertion.
impl<K, V, P, S> Extend<V> for ListLookupDictionary<K, V, P, S>
where
    K: Eq + Hash,
    P: KeyPolicy<K, V>,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = V>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        self.store.values.reserve(iter.size_hint().0);
        for value in iter {
            if let Err(e) = self.push_unchecked(value) {
                panic!("{e}");
            }
        }
    }
}

impl<'a, K, V, P, S> Extend<&'a V> for ListLookupDictionary<K, V, P, S>
where
    K: Eq + Hash,
    V: Clone + 'a,
    P: KeyPolicy<K, V>,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = &'a V>>(&mut self, iter: T) {
        self.extend(iter.into_iter().cloned());
    }
}
