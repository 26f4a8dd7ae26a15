#[cfg(test)]
mod tests;

use {
    crate::{bitset::BitSet, ListLookupDictionary},
    alloc::vec,
    core::{
        fmt::{Debug, Formatter},
        iter::{Enumerate, FusedIterator},
    },
};

/// An owning iterator over the visible elements of a `ListLookupDictionary` in array
/// order. The iterator element type is `V`.
///
/// Hidden elements are dropped. Use [`into_vec`] to keep them.
///
/// This `struct` is created by the [`into_iter`] method on [`ListLookupDictionary`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_vec`]: crate::ListLookupDictionary::into_vec
/// [`into_iter`]: crate::ListLookupDictionary::into_iter
/// [`ListLookupDictionary`]: crate::ListLookupDictionary
/// [`IntoIterator`]: https://doc.rust-lang.org/core/iter/trait.IntoIterator.html
///
/// # Examples
///
/// ```
/// use list_lookup::ListLookupDictionary;
///
/// let mut dict: ListLookupDictionary<&str, &str> = ["a", "b", "c"].into();
/// dict.hide_at(1).unwrap();
///
/// let mut iter = dict.into_iter();
/// assert_eq!(iter.next(), Some("a"));
/// assert_eq!(iter.next(), Some("c"));
///
/// // It is fused iterator
/// assert_eq!(iter.next(), None);
/// assert_eq!(iter.next(), None);
/// ```
pub struct IntoIter<V> {
    iter: Enumerate<vec::IntoIter<V>>,
    hidden: BitSet,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        let hidden = &self.hidden;
        self.iter.find(|(i, _)| !hidden.get(*i)).map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.hidden.count_ones() == 0 {
            self.iter.size_hint()
        } else {
            (0, self.iter.size_hint().1)
        }
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let hidden = &self.hidden;
        self.iter.rfind(|(i, _)| !hidden.get(*i)).map(|(_, v)| v)
    }
}

impl<V> Debug for IntoIter<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntoIter").finish_non_exhaustive()
    }
}

impl<V> FusedIterator for IntoIter<V> {}

impl<K, V, P, S> IntoIterator for ListLookupDictionary<K, V, P, S> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            iter: self.store.values.into_iter().enumerate(),
            hidden: self.store.hidden,
        }
    }
}
