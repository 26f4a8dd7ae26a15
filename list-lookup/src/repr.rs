#[cfg(test)]
mod tests;

mod hash64k;
mod list;
mod primes;

pub(crate) use {hash64k::Hash64k, list::ListRepr};

use crate::{options::DataStructure, store::KeySource};

/// A lookup engine over the backing array.
///
/// Representations never own or move values. The facade mutates the array and tells
/// the representation which slots to `link` and `unlink`. `unlink` must be called
/// while the slot still holds the value that was linked.
pub(crate) trait Strategy {
    /// Returns the probe state from which `next_match` starts searching for `key`.
    fn first_probe<K, T>(&self, keys: &T, key: &K) -> usize
    where
        T: KeySource<K> + ?Sized;

    /// Returns the next visible slot holding `key` and advances the probe.
    fn next_match<K, T>(&self, keys: &T, key: &K, probe: &mut usize) -> Option<usize>
    where
        T: KeySource<K> + ?Sized;

    /// Makes the slot at `index` findable. All other slots must already be linked.
    fn link<K, T>(&mut self, keys: &T, index: usize)
    where
        T: KeySource<K> + ?Sized;

    /// Makes the slot at `index` unfindable.
    fn unlink<K, T>(&mut self, keys: &T, index: usize)
    where
        T: KeySource<K> + ?Sized;

    /// Forgets all slots at or above `len`. They must have been unlinked.
    fn truncate(&mut self, len: usize);

    /// Discards all auxiliary state and links every slot again.
    fn rebuild<K, T>(&mut self, keys: &T, capacity: usize)
    where
        T: KeySource<K> + ?Sized;

    /// Prepares the auxiliary state for `capacity` elements.
    fn reserve<K, T>(&mut self, keys: &T, capacity: usize)
    where
        T: KeySource<K> + ?Sized;
}

/// The active representation of a collection.
#[derive(Clone, Debug)]
pub(crate) enum Repr {
    List(ListRepr),
    Hash64k(Hash64k),
}

impl Repr {
    /// Creates a representation of the given kind over the current contents.
    ///
    /// `kind` must be `List` or `Hash64k`.
    pub fn build<K, T>(kind: DataStructure, keys: &T, capacity: usize) -> Self
    where
        T: KeySource<K> + ?Sized,
    {
        match kind {
            DataStructure::Hash64k => {
                let mut hash = Hash64k::default();
                hash.rebuild(keys, capacity);
                Repr::Hash64k(hash)
            }
            _ => {
                debug_assert_eq!(kind, DataStructure::List);
                Repr::List(ListRepr)
            }
        }
    }

    pub fn kind(&self) -> DataStructure {
        match self {
            Repr::List(_) => DataStructure::List,
            Repr::Hash64k(_) => DataStructure::Hash64k,
        }
    }

    /// Returns the first visible slot holding `key`.
    #[inline]
    pub fn find<K, T>(&self, keys: &T, key: &K) -> Option<usize>
    where
        T: KeySource<K> + ?Sized,
    {
        let mut probe = self.first_probe(keys, key);
        self.next_match(keys, key, &mut probe)
    }
}

macro_rules! dispatch {
    ($slf:expr, $r:ident => $e:expr) => {
        match $slf {
            Repr::List($r) => $e,
            Repr::Hash64k($r) => $e,
        }
    };
}

impl Strategy for Repr {
    #[inline]
    fn first_probe<K, T>(&self, keys: &T, key: &K) -> usize
    where
        T: KeySource<K> + ?Sized,
    {
        dispatch!(self, r => r.first_probe(keys, key))
    }

    #[inline]
    fn next_match<K, T>(&self, keys: &T, key: &K, probe: &mut usize) -> Option<usize>
    where
        T: KeySource<K> + ?Sized,
    {
        dispatch!(self, r => r.next_match(keys, key, probe))
    }

    fn link<K, T>(&mut self, keys: &T, index: usize)
    where
        T: KeySource<K> + ?Sized,
    {
        dispatch!(self, r => r.link(keys, index))
    }

    fn unlink<K, T>(&mut self, keys: &T, index: usize)
    where
        T: KeySource<K> + ?Sized,
    {
        dispatch!(self, r => r.unlink(keys, index))
    }

    fn truncate(&mut self, len: usize) {
        dispatch!(self, r => r.truncate(len))
    }

    fn rebuild<K, T>(&mut self, keys: &T, capacity: usize)
    where
        T: KeySource<K> + ?Sized,
    {
        dispatch!(self, r => r.rebuild(keys, capacity))
    }

    fn reserve<K, T>(&mut self, keys: &T, capacity: usize)
    where
        T: KeySource<K> + ?Sized,
    {
        dispatch!(self, r => r.reserve(keys, capacity))
    }
}
