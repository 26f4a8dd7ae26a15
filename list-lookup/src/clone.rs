#[cfg(test)]
mod tests;

use crate::ListLookupDictionary;

/// Copies the elements, hidden flags, options and lookup structure.
///
/// Index-change observers are carried over. Live indices are not. The copy starts at
/// version 0.
impl<K, V, P, S> Clone for ListLookupDictionary<K, V, P, S>
where
    V: Clone,
    P: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        let mut copy = self.clone_plain();
        copy.changes = self.changes.as_ref().and_then(|c| c.clone_observers());
        copy
    }
}
