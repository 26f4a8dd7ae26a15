
use {
    crate::{
        bitset::BitSet,
        key::KeyPolicy,
        repr::Strategy,
        ListLookupDictionary,
    },
    core::{
        fmt::{Debug, Formatter},
        hash::{BuildHasher, Hash},
        iter::FusedIterator,
    },
};

/// An iterator over the distinct keys of the visible elements of a
/// `ListLookupDictionary`. The iterator element type is `&'a K`.
///
/// Keys are yielded in the order of their first occurrence. In collections with
/// [`Flags::NON_UNIQUE`](crate::Flags::NON_UNIQUE), every yielded key marks all
/// elements with the same key as visited.
///
/// This `struct` is created by the [`distinct_keys`] method on [`ListLookupDictionary`].
///
/// [`distinct_keys`]: crate::ListLookupDictionary::distinct_keys
/// [`ListLookupDictionary`]: crate::ListLookupDictionary
pub struct DistinctKeys<'a, K, V, P, S> {
    dict: &'a ListLookupDictionary<K, V, P, S>,
    next: usize,
    // None if keys are unique.
    visited: Option<BitSet>,
}

impl<'a, K, V, P, S> DistinctKeys<'a, K, V, P, S> {
    pub(crate) fn new(dict: &'a ListLookupDictionary<K, V, P, S>) -> Self {
        let visited = match dict.options.is_unique() {
            true => None,
            false => Some(BitSet::with_len(dict.len())),
        };
        Self {
            dict,
            next: 0,
            visited,
        }
    }
}

impl<'a, K, V, P, S> Iterator for DistinctKeys<'a, K, V, P, S>
where
    K: Eq + Hash,
    P: KeyPolicy<K, V>,
    S: BuildHasher,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let dict = self.dict;
        let store = &dict.store;
        while let Some(value) = store.values.get(self.next) {
            let index = self.next;
            self.next += 1;
            if store.hidden.get(index) {
                continue;
            }
            if let Some(visited) = &self.visited {
                if visited.get(index) {
                    continue;
                }
            }
            let Some(key) = store.policy.key(value) else {
                continue;
            };
            if let Some(visited) = &mut self.visited {
                let mut probe = dict.repr.first_probe(store, key);
                while let Some(i) = dict.repr.next_match(store, key, &mut probe) {
                    visited.set(i, true);
                }
            }
            return Some(key);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.dict.len() - self.next))
    }
}

impl<K, V, P, S> Debug for DistinctKeys<'_, K, V, P, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DistinctKeys")
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

impl<K, V, P, S> FusedIterator for DistinctKeys<'_, K, V, P, S>
where
    K: Eq + Hash,
    P: KeyPolicy<K, V>,
    S: BuildHasher,
{
}
