
use {crate::ListLookupDictionary, core::ops::Index};

/// Accesses elements by position, including hidden elements.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
impl<K, V, P, S> Index<usize> for ListLookupDictionary<K, V, P, S> {
    type Output = V;

    fn index(&self, index: usize) -> &Self::Output {
        &self.store.values[index]
    }
}
