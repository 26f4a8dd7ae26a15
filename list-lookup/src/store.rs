use {
    crate::{bitset::BitSet, key::KeyPolicy},
    alloc::vec::Vec,
    core::{
        hash::{BuildHasher, Hash},
        marker::PhantomData,
    },
};

/// Read access to the keys of the backing array, as seen by a representation.
pub(crate) trait KeySource<K> {
    fn len(&self) -> usize;

    /// Returns the key of the element at `index`, which must be in bounds.
    fn key(&self, index: usize) -> Option<&K>;

    fn is_hidden(&self, index: usize) -> bool;

    fn hash(&self, key: &K) -> u64;

    fn key_eq(&self, a: &K, b: &K) -> bool;

    /// Returns whether the element at `index` is visible and has the key `key`.
    #[inline]
    fn matches(&self, index: usize, key: &K) -> bool {
        !self.is_hidden(index) && self.key(index).is_some_and(|k| self.key_eq(k, key))
    }
}

/// The backing array together with everything needed to interpret it.
///
/// `values[0..len)` holds visible and hidden elements. `hidden` always has the same
/// length as `values`.
pub(crate) struct Store<K, V, P, S> {
    pub values: Vec<V>,
    pub hidden: BitSet,
    pub policy: P,
    pub hasher: S,
    _key: PhantomData<fn() -> K>,
}

impl<K, V, P, S> Store<K, V, P, S> {
    pub fn new(values: Vec<V>, policy: P, hasher: S) -> Self {
        Self {
            hidden: BitSet::with_len(values.len()),
            values,
            policy,
            hasher,
            _key: PhantomData,
        }
    }

    pub fn with_hidden(values: Vec<V>, hidden: BitSet, policy: P, hasher: S) -> Self {
        debug_assert_eq!(values.len(), hidden.len());
        Self {
            values,
            hidden,
            policy,
            hasher,
            _key: PhantomData,
        }
    }
}

impl<K, V, P, S> KeySource<K> for Store<K, V, P, S>
where
    K: Eq + Hash,
    P: KeyPolicy<K, V>,
    S: BuildHasher,
{
    #[inline]
    fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn key(&self, index: usize) -> Option<&K> {
        self.policy.key(&self.values[index])
    }

    #[inline]
    fn is_hidden(&self, index: usize) -> bool {
        self.hidden.get(index)
    }

    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self.policy.hash_key(&self.hasher, key)
    }

    #[inline]
    fn key_eq(&self, a: &K, b: &K) -> bool {
        self.policy.key_eq(a, b)
    }
}
