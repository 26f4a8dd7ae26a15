use {
    crate::ListLookupDictionary,
    core::fmt::{Debug, Formatter},
};

/// Formats the visible elements as a list.
impl<K, V, P, S> Debug for ListLookupDictionary<K, V, P, S>
where
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}
