
use crate::ListLookupDictionary;

/// Two collections are equal if they hold equal elements in the same order and the
/// same elements are hidden.
impl<K, V, P, S> PartialEq for ListLookupDictionary<K, V, P, S>
where
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.store.values == other.store.values && self.store.hidden == other.store.hidden
    }
}

impl<K, V, P, S> Eq for ListLookupDictionary<K, V, P, S> where V: Eq {}
