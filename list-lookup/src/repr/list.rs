use crate::{repr::Strategy, store::KeySource};

/// Linear scan over the backing array. Keeps no state.
///
/// The probe is the next array index to inspect, so matches are produced in array
/// order.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct ListRepr;

impl Strategy for ListRepr {
    #[inline]
    fn first_probe<K, T>(&self, _keys: &T, _key: &K) -> usize
    where
        T: KeySource<K> + ?Sized,
    {
        0
    }

    fn next_match<K, T>(&self, keys: &T, key: &K, probe: &mut usize) -> Option<usize>
    where
        T: KeySource<K> + ?Sized,
    {
        let len = keys.len();
        while *probe < len {
            let index = *probe;
            *probe += 1;
            if keys.matches(index, key) {
                return Some(index);
            }
        }
        None
    }

    #[inline]
    fn link<K, T>(&mut self, _keys: &T, _index: usize)
    where
        T: KeySource<K> + ?Sized,
    {
    }

    #[inline]
    fn unlink<K, T>(&mut self, _keys: &T, _index: usize)
    where
        T: KeySource<K> + ?Sized,
    {
    }

    #[inline]
    fn truncate(&mut self, _len: usize) {}

    #[inline]
    fn rebuild<K, T>(&mut self, _keys: &T, _capacity: usize)
    where
        T: KeySource<K> + ?Sized,
    {
    }

    #[inline]
    fn reserve<K, T>(&mut self, _keys: &T, _capacity: usize)
    where
        T: KeySource<K> + ?Sized,
    {
    }
}
