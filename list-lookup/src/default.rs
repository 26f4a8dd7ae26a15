use {
    crate::{options::Options, ListLookupDictionary},
    alloc::vec::Vec,
};

impl<K, V, P, S> Default for ListLookupDictionary<K, V, P, S>
where
    P: Default,
    S: Default,
{
    fn default() -> Self {
        Self::empty(Vec::new(), Options::new(), P::default(), S::default())
    }
}
