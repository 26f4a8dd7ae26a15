#[cfg(test)]
mod tests;

use crate::{
    error::{Error, Result},
    owner::OwnerId,
    ListLookupDictionary,
};

/// A detached enumerator over the visible elements of a `ListLookupDictionary`.
///
/// Unlike [`Iter`](crate::Iter), a cursor does not borrow the collection between steps,
/// so the collection can be modified while it is in use. Each step checks that the
/// collection's [`version`](ListLookupDictionary::version) is still the one captured
/// when the cursor was created and fails with [`Error::ConcurrentModification`]
/// otherwise. Appending does not change the version, so elements appended during the
/// enumeration are visited too.
///
/// This `struct` is created by the [`cursor`] method on [`ListLookupDictionary`].
///
/// [`cursor`]: crate::ListLookupDictionary::cursor
///
/// # Examples
///
/// ```
/// use list_lookup::ListLookupDictionary;
///
/// let mut dict: ListLookupDictionary<u32, u32> = [1, 2].into();
/// let mut cursor = dict.cursor();
/// while let Some((_, &v)) = cursor.next(&dict).unwrap() {
///     if v < 3 {
///         dict.add(v + 10).unwrap();
///     }
/// }
/// assert_eq!(dict.raw_values(), [1, 2, 11, 12]);
/// ```
#[derive(Clone, Debug)]
pub struct Cursor {
    next: usize,
    version: u64,
    owner: OwnerId,
}

impl Cursor {
    pub(crate) fn new(owner: OwnerId, version: u64) -> Self {
        Self {
            next: 0,
            version,
            owner,
        }
    }

    /// Returns the next visible element and its index.
    ///
    /// Fails with [`Error::Ownership`] if `dict` did not create this cursor.
    pub fn next<'a, K, V, P, S>(
        &mut self,
        dict: &'a ListLookupDictionary<K, V, P, S>,
    ) -> Result<Option<(usize, &'a V)>> {
        self.check(dict)?;
        while let Some(value) = dict.store.values.get(self.next) {
            let index = self.next;
            self.next += 1;
            if !dict.store.hidden.get(index) {
                return Ok(Some((index, value)));
            }
        }
        Ok(None)
    }

    /// Returns the index of the element that [`next`](Self::next) inspects first.
    pub fn position(&self) -> usize {
        self.next
    }

    /// Restarts the enumeration and captures the current version of `dict`.
    pub fn reset<K, V, P, S>(&mut self, dict: &ListLookupDictionary<K, V, P, S>) -> Result<()> {
        if self.owner != dict.owner {
            return Err(Error::Ownership);
        }
        self.next = 0;
        self.version = dict.version;
        Ok(())
    }

    fn check<K, V, P, S>(&self, dict: &ListLookupDictionary<K, V, P, S>) -> Result<()> {
        if self.owner != dict.owner {
            return Err(Error::Ownership);
        }
        if self.version != dict.version {
            return Err(Error::ConcurrentModification {
                expected: self.version,
                found: dict.version,
            });
        }
        Ok(())
    }
}
