
use {
    crate::{bitset::BitSet, key::KeyPolicy, ListLookupDictionary},
    core::{
        fmt::{Debug, Formatter},
        iter::{Enumerate, FusedIterator},
        marker::PhantomData,
        slice,
    },
};

/// An iterator over the visible elements of a `ListLookupDictionary` and their indices.
/// The iterator element type is `(usize, &'a V)`.
///
/// This `struct` is created by the [`iter`] method on [`ListLookupDictionary`].
///
/// [`iter`]: crate::ListLookupDictionary::iter
/// [`ListLookupDictionary`]: crate::ListLookupDictionary
///
/// # Examples
///
/// ```
/// use list_lookup::ListLookupDictionary;
///
/// let mut dict: ListLookupDictionary<char, char> = ['a', 'b', 'c'].into();
/// dict.hide_at(0).unwrap();
///
/// let mut iter = dict.iter();
/// assert_eq!(iter.next(), Some((1, &'b')));
/// assert_eq!(iter.next_back(), Some((2, &'c')));
/// assert_eq!(iter.next(), None);
/// ```
pub struct Iter<'a, V> {
    iter: Enumerate<slice::Iter<'a, V>>,
    hidden: &'a BitSet,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(values: &'a [V], hidden: &'a BitSet) -> Self {
        Self {
            iter: values.iter().enumerate(),
            hidden,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (usize, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let hidden = self.hidden;
        self.iter.find(|(i, _)| !hidden.get(*i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.hidden.count_ones() == 0 {
            self.iter.size_hint()
        } else {
            (0, self.iter.size_hint().1)
        }
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let hidden = self.hidden;
        self.iter.rfind(|(i, _)| !hidden.get(*i))
    }
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
            hidden: self.hidden,
        }
    }
}

impl<V> Debug for Iter<'_, V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

/// An iterator over the visible elements of a `ListLookupDictionary` in array order.
/// The iterator element type is `&'a V`.
///
/// This `struct` is created by the [`values`] method on [`ListLookupDictionary`].
///
/// [`values`]: crate::ListLookupDictionary::values
/// [`ListLookupDictionary`]: crate::ListLookupDictionary
pub struct Values<'a, V> {
    iter: Iter<'a, V>,
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(values: &'a [V], hidden: &'a BitSet) -> Self {
        Self {
            iter: Iter::new(values, hidden),
        }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<V> DoubleEndedIterator for Values<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, v)| v)
    }
}

impl<V> Clone for Values<'_, V> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<V> Debug for Values<'_, V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<V> FusedIterator for Values<'_, V> {}

impl<'a, K, V, P, S> IntoIterator for &'a ListLookupDictionary<K, V, P, S> {
    type Item = &'a V;
    type IntoIter = Values<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}

/// An iterator over the keys of the visible elements of a `ListLookupDictionary`.
/// The iterator element type is `&'a K`.
///
/// Elements without a key are skipped.
///
/// This `struct` is created by the [`keys`] method on [`ListLookupDictionary`].
///
/// [`keys`]: crate::ListLookupDictionary::keys
/// [`ListLookupDictionary`]: crate::ListLookupDictionary
///
/// # Examples
///
/// ```
/// use list_lookup::{ListLookupDictionary, Options, PairKey};
///
/// let mut dict: ListLookupDictionary<u8, (u8, &str), PairKey> =
///     ListLookupDictionary::with_options_and_policy(Options::new(), PairKey).unwrap();
/// dict.add_range([(2, "b"), (1, "a")]).unwrap();
/// assert_eq!(dict.keys().copied().collect::<Vec<_>>(), [2, 1]);
/// ```
pub struct Keys<'a, K, V, P> {
    iter: Iter<'a, V>,
    policy: &'a P,
    _key: PhantomData<fn() -> K>,
}

impl<'a, K, V, P> Keys<'a, K, V, P> {
    pub(crate) fn new(values: &'a [V], hidden: &'a BitSet, policy: &'a P) -> Self {
        Self {
            iter: Iter::new(values, hidden),
            policy,
            _key: PhantomData,
        }
    }
}

impl<'a, K, V, P> Iterator for Keys<'a, K, V, P>
where
    K: 'a,
    P: KeyPolicy<K, V>,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let policy = self.policy;
        self.iter.find_map(|(_, v)| policy.key(v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<K, V, P> Clone for Keys<'_, K, V, P> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
            policy: self.policy,
            _key: PhantomData,
        }
    }
}

impl<'a, K, V, P> Debug for Keys<'a, K, V, P>
where
    K: Debug + 'a,
    P: KeyPolicy<K, V>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, P> FusedIterator for Keys<'a, K, V, P>
where
    K: 'a,
    P: KeyPolicy<K, V>,
{
}
