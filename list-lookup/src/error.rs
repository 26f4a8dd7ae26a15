
use {crate::options::DataStructure, thiserror::Error};

/// The error type returned by fallible [`ListLookupDictionary`] operations.
///
/// Every error is reported before the collection is modified. A call that returns an
/// error leaves the collection exactly as it was.
///
/// [`ListLookupDictionary`]: crate::ListLookupDictionary
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Keys must be unique and a visible element with the same key already exists.
    #[error("an element with the same key already exists at index {index}")]
    DuplicateKey {
        /// The index of the existing element.
        index: usize,
    },
    /// The key is not present and the collection is configured to report this.
    #[error("the given key was not present in the collection")]
    KeyNotFound,
    /// The key extracted from a value is not equal to the key it was stored under.
    #[error("the key of the value does not match the given key")]
    KeyMismatch,
    /// An index, count or capacity is outside of the permitted range.
    #[error("{what} {value} is out of range (limit {limit})")]
    ArgumentRange {
        /// The name of the offending argument.
        what: &'static str,
        /// The value that was passed.
        value: usize,
        /// The exclusive upper bound, or the lower bound for capacities.
        limit: usize,
    },
    /// The data structure was fixed at construction and cannot be changed.
    #[error("the data structure is fixed to {current:?} and cannot change to {requested:?}")]
    FixedRepresentation {
        /// The data structure the collection was fixed to.
        current: DataStructure,
        /// The data structure that was requested.
        requested: DataStructure,
    },
    /// The requested data structure is not available or cannot hold this many elements.
    #[error("the {requested:?} data structure cannot hold {count} elements")]
    UnsupportedRepresentation {
        /// The data structure that would be required.
        requested: DataStructure,
        /// The number of elements it would have to hold.
        count: usize,
    },
    /// The collection was modified while a [`Cursor`](crate::Cursor) was in use.
    #[error("the collection was modified during enumeration (expected version {expected}, found {found})")]
    ConcurrentModification {
        /// The version captured when the cursor was created.
        expected: u64,
        /// The current version of the collection.
        found: u64,
    },
    /// A handle was passed to a collection that did not create it.
    #[error("the handle belongs to a different collection")]
    Ownership,
    /// The key policy cannot derive a key from the value.
    #[error("cannot derive a key from the value for index {index}")]
    UnsupportedKeyShape {
        /// The index the value was going to be stored at.
        index: usize,
    },
}

/// A `Result` alias where the `Err` case is [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
