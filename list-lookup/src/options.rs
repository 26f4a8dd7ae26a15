#[cfg(test)]
mod tests;

use bitflags::bitflags;

/// The largest number of elements for which [`DataStructure::Auto`] uses the list
/// representation.
pub const LIST_MAX: usize = 32;

/// The largest number of elements the [`DataStructure::Hash64k`] representation can hold.
///
/// Chain links are stored as 16-bit integers where `0` marks the end of a chain, so
/// element `i` is stored as `i + 1`.
pub const HASH64K_MAX: usize = u16::MAX as usize;

bitflags! {
    /// Behavior flags of a [`ListLookupDictionary`](crate::ListLookupDictionary).
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        /// Multiple visible elements may share a key.
        ///
        /// Insertions skip the duplicate-key check entirely.
        const NON_UNIQUE = 1 << 0;
        /// The data structure chosen at construction can never change.
        ///
        /// Combined with [`DataStructure::Auto`], the data structure is resolved once
        /// from the initial contents and then pinned.
        const FIXED = 1 << 1;
    }
}

/// What the dictionary getter does when a key is not present.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MissingKey {
    /// Return [`Error::KeyNotFound`](crate::Error::KeyNotFound).
    #[default]
    Error,
    /// Return the default value of the value type without modifying the collection.
    ReturnDefault,
    /// Create a value with [`KeyPolicy::create_from_key`](crate::KeyPolicy::create_from_key)
    /// and add it.
    CreateFromKey,
}

/// The internal representation used to look up keys.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DataStructure {
    /// Choose between `List` and `Hash64k` based on the number of elements.
    #[default]
    Auto,
    /// Linear scan without any auxiliary index.
    List,
    /// Chained hash table with 16-bit links, holding at most [`HASH64K_MAX`] elements.
    Hash64k,
    /// Unbounded hash table. Reserved, requesting it is an error.
    Hash,
}

/// Construction options of a [`ListLookupDictionary`](crate::ListLookupDictionary).
///
/// # Examples
///
/// ```
/// use list_lookup::{DataStructure, ListLookupDictionary, MissingKey, Options};
///
/// let options = Options::new()
///     .capacity(100)
///     .non_unique()
///     .missing(MissingKey::ReturnDefault)
///     .data_structure(DataStructure::Hash64k);
/// let dict: ListLookupDictionary<u32, u32> = ListLookupDictionary::with_options(options).unwrap();
/// assert!(dict.capacity() >= 100);
/// assert_eq!(dict.data_structure(), DataStructure::Hash64k);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Options {
    /// The initial capacity of the backing array.
    pub capacity: usize,
    /// Behavior flags.
    pub flags: Flags,
    /// The policy of the dictionary getter for missing keys.
    pub missing: MissingKey,
    /// The requested data structure.
    pub data_structure: DataStructure,
}

impl Options {
    /// Unique keys, [`MissingKey::Error`], [`DataStructure::Auto`], no capacity.
    pub const fn new() -> Self {
        Self {
            capacity: 0,
            flags: Flags::empty(),
            missing: MissingKey::Error,
            data_structure: DataStructure::Auto,
        }
    }

    /// Sets the initial capacity.
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Replaces the flags.
    pub const fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Allows duplicate keys.
    pub const fn non_unique(mut self) -> Self {
        self.flags = self.flags.union(Flags::NON_UNIQUE);
        self
    }

    /// Pins the data structure.
    pub const fn fixed(mut self) -> Self {
        self.flags = self.flags.union(Flags::FIXED);
        self
    }

    /// Sets the missing-key policy.
    pub const fn missing(mut self, missing: MissingKey) -> Self {
        self.missing = missing;
        self
    }

    /// Sets the requested data structure.
    pub const fn data_structure(mut self, data_structure: DataStructure) -> Self {
        self.data_structure = data_structure;
        self
    }

    /// Returns whether keys must be unique.
    pub const fn is_unique(&self) -> bool {
        !self.flags.contains(Flags::NON_UNIQUE)
    }

    /// Returns whether the data structure is pinned.
    pub const fn is_fixed(&self) -> bool {
        self.flags.contains(Flags::FIXED)
    }
}
