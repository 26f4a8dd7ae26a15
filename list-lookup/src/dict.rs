
use {
    crate::{
        bitset::BitSet,
        cursor::Cursor,
        distinct_keys::DistinctKeys,
        error::{Error, Result},
        iter::{Iter, Keys, Values},
        key::{KeyPolicy, SelfKey},
        live_index::{IndexChange, IndexChangeManager},
        lookup::Lookup,
        options::{DataStructure, MissingKey, Options, HASH64K_MAX, LIST_MAX},
        owner::OwnerId,
        repr::{ListRepr, Repr, Strategy},
        store::Store,
    },
    alloc::{borrow::Cow, boxed::Box, vec::Vec},
    core::{
        hash::{BuildHasher, Hash},
        mem,
    },
    hashbrown::DefaultHashBuilder,
    min_max_heap::MinMaxHeap,
};

/// A list, dictionary and multi-value lookup over a single array of values.
///
/// Keys are not stored. Every element's key is derived from the element itself by the
/// [`KeyPolicy`] `P`. Elements stay in the order in which they were inserted, except
/// that [`remove_at`](Self::remove_at) moves the last element into the vacated slot.
///
/// Lookups by key go through one of two interchangeable data structures:
///
/// - `List`: a linear scan, used for up to [`LIST_MAX`] elements.
/// - `Hash64k`: a chained hash table with 16-bit links, used for up to [`HASH64K_MAX`]
///   elements.
///
/// With [`DataStructure::Auto`] the collection switches between them as it grows and
/// shrinks. Both produce the same observable results.
///
/// Elements can be [hidden](Self::hide_at). A hidden element keeps its position but is
/// invisible to key lookups, duplicate checks and [`values`](Self::values).
///
/// # Examples
///
/// ```
/// use list_lookup::{ListLookupDictionary, Options, PairKey};
///
/// let mut dict: ListLookupDictionary<u32, (u32, &str), PairKey> =
///     ListLookupDictionary::with_options_and_policy(Options::new(), PairKey).unwrap();
/// dict.add((5, "five")).unwrap();
/// dict.add((3, "three")).unwrap();
/// dict.add((9, "nine")).unwrap();
/// assert_eq!(dict.index_of_key(&3), Some(1));
/// assert!(dict.add((3, "again")).is_err());
///
/// // Moves the last element into slot 0.
/// dict.remove_at(0).unwrap();
/// assert_eq!(dict[0], (9, "nine"));
/// assert!(!dict.contains_key(&5));
/// ```
//
// Invariants:
//
// - store.hidden.len() == store.values.len()
// - repr is linked with every visible, keyed slot and nothing else.
// - If options.is_unique(), no two visible slots have equal keys. Unchecked
//   construction may violate this. Lookups then return the first match.
// - repr.kind() is the result of choose(options.data_structure, len), except that a
//   shrinking collection keeps its representation if the choice fails.
pub struct ListLookupDictionary<K, V, P = SelfKey, S = DefaultHashBuilder> {
    pub(crate) store: Store<K, V, P, S>,
    pub(crate) repr: Repr,
    pub(crate) options: Options,
    pub(crate) version: u64,
    pub(crate) changes: Option<Box<IndexChangeManager>>,
    pub(crate) owner: OwnerId,
}

/// The result of [`find_or_create`](ListLookupDictionary::find_or_create).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The key was present at this index.
    Found(usize),
    /// A value was created at this index.
    Created(usize),
}

impl Slot {
    /// Returns the index of the element.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Slot::Found(i) | Slot::Created(i) => i,
        }
    }

    /// Returns whether the element was created.
    #[inline]
    pub fn is_created(self) -> bool {
        matches!(self, Slot::Created(_))
    }

    /// Encodes the slot as a single integer.
    ///
    /// Found elements are returned as their index, created elements as the bitwise
    /// complement of their index, which is always negative.
    ///
    /// ```
    /// use list_lookup::Slot;
    ///
    /// assert_eq!(Slot::Found(3).encoded(), 3);
    /// assert_eq!(Slot::Created(3).encoded(), -4);
    /// ```
    pub fn encoded(self) -> isize {
        match self {
            Slot::Found(i) => i as isize,
            Slot::Created(i) => !(i as isize),
        }
    }
}

/// Selects the representation for `count` elements.
pub(crate) fn choose(requested: DataStructure, count: usize) -> Result<DataStructure> {
    let kind = match requested {
        DataStructure::Auto if count <= LIST_MAX => DataStructure::List,
        DataStructure::Auto if count <= HASH64K_MAX => DataStructure::Hash64k,
        DataStructure::Auto => {
            return Err(Error::UnsupportedRepresentation {
                requested: DataStructure::Hash,
                count,
            })
        }
        DataStructure::Hash64k if count > HASH64K_MAX => {
            return Err(Error::UnsupportedRepresentation {
                requested: DataStructure::Hash64k,
                count,
            })
        }
        DataStructure::Hash => {
            return Err(Error::UnsupportedRepresentation {
                requested: DataStructure::Hash,
                count,
            })
        }
        kind => kind,
    };
    Ok(kind)
}

impl<K, V, P> ListLookupDictionary<K, V, P, DefaultHashBuilder>
where
    P: Default,
{
    /// Creates an empty collection with unique keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::ListLookupDictionary;
    ///
    /// let dict = ListLookupDictionary::<u32, u32>::new();
    /// assert_eq!(dict.len(), 0);
    /// assert_eq!(dict.capacity(), 0);
    /// ```
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty collection that can hold `capacity` elements without
    /// reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::ListLookupDictionary;
    ///
    /// let dict = ListLookupDictionary::<u32, u32>::with_capacity(10);
    /// assert!(dict.capacity() >= 10);
    /// ```
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::empty(
            Vec::with_capacity(capacity),
            Options::new().capacity(capacity),
            P::default(),
            DefaultHashBuilder::default(),
        )
    }
}

impl<K, V, P> ListLookupDictionary<K, V, P, DefaultHashBuilder>
where
    K: Eq + Hash,
    P: KeyPolicy<K, V>,
{
    /// Creates an empty collection with the given options.
    ///
    /// Fails if `options` request [`DataStructure::Hash`].
    pub fn with_options(options: Options) -> Result<Self>
    where
        P: Default,
    {
        Self::with_options_and_policy(options, P::default())
    }

    /// Creates an empty collection with the given options and key policy.
    pub fn with_options_and_policy(options: Options, policy: P) -> Result<Self> {
        Self::with_options_policy_and_hasher(options, policy, DefaultHashBuilder::default())
    }
}

impl<K, V, P, S> ListLookupDictionary<K, V, P, S> {
    pub(crate) fn empty(values: Vec<V>, options: Options, policy: P, hasher: S) -> Self {
        Self {
            store: Store::new(values, policy, hasher),
            repr: Repr::List(ListRepr),
            options,
            version: 0,
            changes: None,
            owner: OwnerId::next(),
        }
    }

    /// Returns the number of elements, including hidden elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.values.len()
    }

    /// Returns whether the collection contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.values.is_empty()
    }

    /// Returns the capacity of the backing array.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.values.capacity()
    }

    /// Returns the options of this collection.
    ///
    /// If the collection was created with [`Flags::FIXED`](crate::Flags::FIXED) and
    /// [`DataStructure::Auto`], `data_structure` holds the data structure that was
    /// chosen at construction.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the data structure currently used for lookups.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::{DataStructure, ListLookupDictionary};
    ///
    /// let mut dict = ListLookupDictionary::<u32, u32>::new();
    /// assert_eq!(dict.data_structure(), DataStructure::List);
    /// dict.add_range(0..70).unwrap();
    /// assert_eq!(dict.data_structure(), DataStructure::Hash64k);
    /// ```
    #[inline]
    pub fn data_structure(&self) -> DataStructure {
        self.repr.kind()
    }

    /// Returns the modification counter.
    ///
    /// The counter is incremented whenever existing elements move or are replaced.
    /// Appending and reserving capacity leave it unchanged.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns the key policy.
    pub fn policy(&self) -> &P {
        &self.store.policy
    }

    /// Returns the hasher.
    pub fn hasher(&self) -> &S {
        &self.store.hasher
    }

    /// Returns all elements, including hidden elements, in array order.
    #[inline]
    pub fn raw_values(&self) -> &[V] {
        &self.store.values
    }

    /// Returns the element at `index`, hidden or not.
    #[inline]
    pub fn get_by_index(&self, index: usize) -> Option<&V> {
        self.store.values.get(index)
    }

    /// Returns a mutable reference to the element at `index`, hidden or not.
    ///
    /// The key of a visible element must not be changed through this reference. Hide
    /// the element first, or call [`unhide_at`](Self::unhide_at) with `refresh_key`
    /// afterwards.
    #[inline]
    pub fn get_by_index_mut(&mut self, index: usize) -> Option<&mut V> {
        self.store.values.get_mut(index)
    }

    /// Returns whether the element at `index` is hidden.
    #[inline]
    pub fn is_hidden(&self, index: usize) -> bool {
        self.store.hidden.get(index)
    }

    /// Returns the number of hidden elements.
    pub fn hidden_count(&self) -> usize {
        self.store.hidden.count_ones()
    }

    /// Returns an iterator over the visible elements in array order.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::ListLookupDictionary;
    ///
    /// let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    /// dict.hide_at(1).unwrap();
    /// assert_eq!(dict.values().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn values(&self) -> Values<'_, V> {
        Values::new(&self.store.values, &self.store.hidden)
    }

    /// Returns an iterator over the visible elements and their indices.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.store.values, &self.store.hidden)
    }

    /// Returns a cursor that enumerates the visible elements and detects modifications.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::{Error, ListLookupDictionary};
    ///
    /// let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    /// let mut cursor = dict.cursor();
    /// assert_eq!(cursor.next(&dict), Ok(Some((0, &1))));
    /// dict.remove_at(0).unwrap();
    /// assert!(matches!(cursor.next(&dict), Err(Error::ConcurrentModification { .. })));
    /// ```
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.owner, self.version)
    }

    /// Consumes the collection and returns the backing array, including hidden elements.
    pub fn into_vec(self) -> Vec<V> {
        self.store.values
    }

    /// Copies all elements, including hidden elements, to the start of `dst`.
    pub fn copy_to(&self, dst: &mut [V]) -> Result<()>
    where
        V: Clone,
    {
        let len = self.len();
        if dst.len() < len {
            return Err(Error::ArgumentRange {
                what: "destination length",
                value: dst.len(),
                limit: len,
            });
        }
        dst[..len].clone_from_slice(&self.store.values);
        Ok(())
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(Error::ArgumentRange {
                what: "index",
                value: index,
                limit: len,
            });
        }
        Ok(())
    }
}

impl<K, V, P, S> ListLookupDictionary<K, V, P, S>
where
    K: Eq + Hash,
    P: KeyPolicy<K, V>,
    S: BuildHasher,
{
    /// Creates an empty collection with the given options, key policy and hasher.
    ///
    /// # Examples
    ///
    /// ```
    /// use {
    ///     hashbrown::DefaultHashBuilder,
    ///     list_lookup::{DataStructure, Flags, ListLookupDictionary, Options, SelfKey},
    /// };
    ///
    /// let options = Options::new().capacity(1000).flags(Flags::FIXED);
    /// let dict: ListLookupDictionary<u32, u32> =
    ///     ListLookupDictionary::with_options_policy_and_hasher(options, SelfKey, DefaultHashBuilder::default())
    ///         .unwrap();
    /// // Fixed collections choose their data structure from the initial capacity.
    /// assert_eq!(dict.data_structure(), DataStructure::Hash64k);
    /// ```
    pub fn with_options_policy_and_hasher(options: Options, policy: P, hasher: S) -> Result<Self> {
        let values = Vec::with_capacity(options.capacity);
        Self::build(values, None, options, policy, hasher)
    }

    /// Creates a collection from existing values.
    ///
    /// Keys are not checked for uniqueness. Fails if there are more values than any
    /// allowed data structure can hold.
    ///
    /// # Examples
    ///
    /// ```
    /// use {
    ///     hashbrown::DefaultHashBuilder,
    ///     list_lookup::{ListLookupDictionary, Options, SelfKey},
    /// };
    ///
    /// let dict: ListLookupDictionary<u32, u32> = ListLookupDictionary::from_values(
    ///     vec![4, 4, 2],
    ///     Options::new(),
    ///     SelfKey,
    ///     DefaultHashBuilder::default(),
    /// )
    /// .unwrap();
    /// assert_eq!(dict.index_of_key(&4), Some(0));
    /// ```
    pub fn from_values(values: Vec<V>, options: Options, policy: P, hasher: S) -> Result<Self> {
        Self::build(values, None, options, policy, hasher)
    }

    pub(crate) fn build(
        values: Vec<V>,
        hidden: Option<BitSet>,
        mut options: Options,
        policy: P,
        hasher: S,
    ) -> Result<Self> {
        let len = values.len();
        let kind = if options.is_fixed() && options.data_structure == DataStructure::Auto {
            let kind = choose(DataStructure::Auto, len.max(options.capacity))
                .or_else(|_| choose(DataStructure::Auto, len))?;
            options.data_structure = kind;
            kind
        } else {
            choose(options.data_structure, len)?
        };
        let hidden = hidden.unwrap_or_else(|| BitSet::with_len(len));
        let store = Store::with_hidden(values, hidden, policy, hasher);
        let repr = Repr::build(kind, &store, store.values.capacity());
        Ok(Self {
            store,
            repr,
            options,
            version: 0,
            changes: None,
            owner: OwnerId::next(),
        })
    }

    #[inline]
    fn kind_for(&self, count: usize) -> Result<DataStructure> {
        choose(self.options.data_structure, count)
    }

    fn switch(&mut self, kind: DataStructure) {
        log::debug!(
            "switching from {:?} to {:?} at {} elements",
            self.repr.kind(),
            kind,
            self.len(),
        );
        self.repr = Repr::build(kind, &self.store, self.store.values.capacity());
    }

    /// Links a slot that was just appended.
    fn link_last(&mut self, kind: DataStructure) {
        if kind == self.repr.kind() {
            self.repr.link(&self.store, self.len() - 1);
        } else {
            self.switch(kind);
        }
    }

    /// Relinks all slots after elements have moved.
    fn relink_all(&mut self, kind: DataStructure) {
        if kind == self.repr.kind() {
            self.repr.rebuild(&self.store, self.store.values.capacity());
        } else {
            self.switch(kind);
        }
    }

    /// Returns the representation for a collection that shrinks to `count` elements.
    fn kind_after_shrink(&self, count: usize) -> DataStructure {
        self.kind_for(count).unwrap_or_else(|_| self.repr.kind())
    }

    fn key_of<'v>(&self, value: &'v V, index: usize) -> Result<&'v K> {
        self.store
            .policy
            .key(value)
            .ok_or(Error::UnsupportedKeyShape { index })
    }

    /// Checks that `value` can be stored at `index` without duplicating a visible key
    /// other than the one at `skip`.
    fn check_value(&self, value: &V, index: usize, skip: Option<usize>) -> Result<()> {
        let key = self.key_of(value, index)?;
        if self.options.is_unique() {
            let mut probe = self.repr.first_probe(&self.store, key);
            while let Some(i) = self.repr.next_match(&self.store, key, &mut probe) {
                if Some(i) != skip {
                    return Err(Error::DuplicateKey { index: i });
                }
            }
        }
        Ok(())
    }

    /// Appends a value and returns its index.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::{Error, ListLookupDictionary};
    ///
    /// let mut dict = ListLookupDictionary::<u32, u32>::new();
    /// assert_eq!(dict.add(5), Ok(0));
    /// assert_eq!(dict.add(3), Ok(1));
    /// assert_eq!(dict.add(5), Err(Error::DuplicateKey { index: 0 }));
    /// assert_eq!(dict.len(), 2);
    /// ```
    pub fn add(&mut self, value: V) -> Result<usize> {
        let index = self.len();
        self.insert(index, value)?;
        Ok(index)
    }

    /// Appends all values of an iterator.
    ///
    /// Stops at the first value that cannot be added. Values added before that remain
    /// in the collection.
    pub fn add_range<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
    {
        let values = values.into_iter();
        self.store.values.reserve(values.size_hint().0);
        for value in values {
            self.add(value)?;
        }
        Ok(())
    }

    /// Appends a value without checking its key.
    pub(crate) fn push_unchecked(&mut self, value: V) -> Result<()> {
        let kind = self.kind_for(self.len() + 1)?;
        self.store.values.push(value);
        self.store.hidden.push(false);
        self.link_last(kind);
        Ok(())
    }

    /// Inserts a value at `index`, shifting all following elements one slot up.
    ///
    /// Inserting anywhere but at the end increments the [`version`](Self::version)
    /// and reports the shift to observers and live indices.
    pub fn insert(&mut self, index: usize, value: V) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(Error::ArgumentRange {
                what: "index",
                value: index,
                limit: len + 1,
            });
        }
        self.check_value(&value, index, None)?;
        let kind = self.kind_for(len + 1)?;
        self.store.values.insert(index, value);
        self.store.hidden.insert(index, false);
        if index == len {
            self.link_last(kind);
        } else {
            self.version += 1;
            self.relink_all(kind);
            self.notify(IndexChange::moved(index, index + 1, len - index));
        }
        Ok(())
    }

    /// Removes the element at `index` by moving the last element into its slot.
    ///
    /// This is O(1) but **does not preserve order**: the element that was last is now
    /// at `index`. Use [`remove_range`](Self::remove_range) to preserve order.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::ListLookupDictionary;
    ///
    /// let mut dict: ListLookupDictionary<u32, u32> = [5, 3, 9].into();
    /// assert_eq!(dict.remove_at(0), Ok(5));
    /// assert_eq!(dict.raw_values(), [9, 3]);
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<V> {
        self.check_index(index)?;
        Ok(self.fast_remove(index))
    }

    fn fast_remove(&mut self, index: usize) -> V {
        let last = self.len() - 1;
        self.repr.unlink(&self.store, index);
        if index != last {
            self.repr.unlink(&self.store, last);
        }
        let value = self.store.values.swap_remove(index);
        self.store.hidden.swap_remove(index);
        self.repr.truncate(last);
        let kind = self.kind_after_shrink(last);
        if kind != self.repr.kind() {
            self.switch(kind);
        } else if index != last {
            self.repr.link(&self.store, index);
        }
        self.version += 1;
        self.notify(IndexChange::removed(index, 1));
        if index != last {
            self.notify(IndexChange::moved(last, index, 1));
        }
        value
    }

    /// Removes `count` elements starting at `index`, preserving the order of the
    /// remaining elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::ListLookupDictionary;
    ///
    /// let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3, 4, 5].into();
    /// dict.remove_range(1, 2).unwrap();
    /// assert_eq!(dict.raw_values(), [1, 4, 5]);
    /// assert!(dict.remove_range(2, 2).is_err());
    /// ```
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(Error::ArgumentRange {
                what: "index",
                value: index,
                limit: len + 1,
            });
        }
        if count > len - index {
            return Err(Error::ArgumentRange {
                what: "count",
                value: count,
                limit: len - index + 1,
            });
        }
        if count == 0 {
            return Ok(());
        }
        let end = index + count;
        self.store.values.drain(index..end);
        self.store.hidden.remove_range(index, count);
        self.version += 1;
        let kind = self.kind_after_shrink(len - count);
        self.relink_all(kind);
        self.notify(IndexChange::removed(index, count));
        if end < len {
            self.notify(IndexChange::moved(end, index, len - end));
        }
        Ok(())
    }

    /// Removes the first visible element with the given key.
    ///
    /// Uses the same slot-filling strategy as [`remove_at`](Self::remove_at).
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.index_of_key(key)?;
        Some(self.fast_remove(index))
    }

    /// Removes every visible element with the given key and returns how many were
    /// removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::{ListLookupDictionary, Options};
    ///
    /// let mut dict: ListLookupDictionary<u32, u32> =
    ///     ListLookupDictionary::with_options(Options::new().non_unique()).unwrap();
    /// dict.add_range([1, 2, 1, 3, 1]).unwrap();
    /// assert_eq!(dict.remove_all_values(&1), 3);
    /// assert_eq!(dict.len(), 2);
    /// ```
    pub fn remove_all_values(&mut self, key: &K) -> usize {
        let mut doomed = MinMaxHeap::new();
        let mut probe = self.repr.first_probe(&self.store, key);
        while let Some(i) = self.repr.next_match(&self.store, key, &mut probe) {
            doomed.push(i);
        }
        self.remove_indices(doomed)
    }

    /// Removes all elements for which `f` returns `false`.
    ///
    /// Hidden elements are passed to `f` as well. Removal fills slots from the end, so
    /// the order of the remaining elements is not preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::ListLookupDictionary;
    ///
    /// let mut dict: ListLookupDictionary<u32, u32> = (0..10).collect();
    /// assert_eq!(dict.retain(|v| v % 3 == 0), 6);
    /// let mut rest = dict.into_vec();
    /// rest.sort();
    /// assert_eq!(rest, [0, 3, 6, 9]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(&V) -> bool,
    {
        let doomed: MinMaxHeap<usize> = self
            .store
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| !f(v))
            .map(|(i, _)| i)
            .collect();
        self.remove_indices(doomed)
    }

    fn remove_indices(&mut self, mut doomed: MinMaxHeap<usize>) -> usize {
        let removed = doomed.len();
        // Highest first so that only surviving elements are moved into freed slots.
        while let Some(index) = doomed.pop_max() {
            self.fast_remove(index);
        }
        removed
    }

    /// Replaces the element at `index` and returns the old element.
    ///
    /// The hidden state of the slot is kept.
    pub fn set(&mut self, index: usize, value: V) -> Result<V> {
        self.check_index(index)?;
        if self.is_hidden(index) {
            self.key_of(&value, index)?;
        } else {
            self.check_value(&value, index, Some(index))?;
        }
        self.repr.unlink(&self.store, index);
        let old = mem::replace(&mut self.store.values[index], value);
        self.repr.link(&self.store, index);
        self.version += 1;
        Ok(old)
    }

    /// Stores `value` under `key`, replacing the element with that key if there is one.
    ///
    /// Fails with [`Error::KeyMismatch`] if the key of `value` is not `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::{Error, ListLookupDictionary, Options, PairKey};
    ///
    /// let mut dict: ListLookupDictionary<u32, (u32, &str), PairKey> =
    ///     ListLookupDictionary::with_options_and_policy(Options::new(), PairKey).unwrap();
    /// dict.set_value(&1, (1, "a")).unwrap();
    /// dict.set_value(&1, (1, "b")).unwrap();
    /// assert_eq!(dict.len(), 1);
    /// assert_eq!(dict.get(&1), Some(&(1, "b")));
    /// assert_eq!(dict.set_value(&2, (3, "c")), Err(Error::KeyMismatch));
    /// ```
    pub fn set_value(&mut self, key: &K, value: V) -> Result<()> {
        let own = self.key_of(&value, self.len())?;
        if !self.store.policy.key_eq(own, key) {
            return Err(Error::KeyMismatch);
        }
        match self.index_of_key(key) {
            Some(index) => self.set(index, value).map(drop),
            None => self.add(value).map(drop),
        }
    }

    /// Adds `value`, or replaces the visible element with the same key.
    ///
    /// Returns the replaced element.
    pub fn insert_or_replace(&mut self, value: V) -> Result<Option<V>> {
        let index = {
            let key = self.key_of(&value, self.len())?;
            self.repr.find(&self.store, key)
        };
        match index {
            Some(index) => self.set(index, value).map(Some),
            None => self.add(value).map(|_| None),
        }
    }

    /// Returns the index of the first visible element with the given key.
    #[inline]
    pub fn index_of_key(&self, key: &K) -> Option<usize> {
        self.repr.find(&self.store, key)
    }

    /// Returns whether a visible element has the given key.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.index_of_key(key).is_some()
    }

    /// Returns the first visible element with the given key.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.index_of_key(key)?;
        Some(&self.store.values[index])
    }

    /// Returns a mutable reference to the first visible element with the given key.
    ///
    /// The key of the element must not be changed through this reference.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.index_of_key(key)?;
        Some(&mut self.store.values[index])
    }

    /// Returns the index of the first visible element with the given key or fails with
    /// [`Error::KeyNotFound`], regardless of the [`MissingKey`] policy.
    pub fn find_or_throw(&self, key: &K) -> Result<usize> {
        self.index_of_key(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the index of the first visible element equal to `value`.
    ///
    /// The element must have the same key and compare equal with
    /// [`KeyPolicy::value_eq`].
    pub fn index_of(&self, value: &V) -> Option<usize>
    where
        V: PartialEq,
    {
        let key = self.store.policy.key(value)?;
        let mut probe = self.repr.first_probe(&self.store, key);
        while let Some(i) = self.repr.next_match(&self.store, key, &mut probe) {
            if self.store.policy.value_eq(&self.store.values[i], value) {
                return Some(i);
            }
        }
        None
    }

    /// Returns whether a visible element is equal to `value`.
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Returns the element with the given key, applying the [`MissingKey`] policy if
    /// there is none.
    ///
    /// With [`MissingKey::ReturnDefault`] a missing key yields `V::default()`, which is
    /// not added. Use [`item_with`](Self::item_with) for values without a `Default`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::KeyNotFound`] if the key is missing and the policy is
    /// [`MissingKey::Error`], or if it is [`MissingKey::CreateFromKey`] and
    /// [`KeyPolicy::create_from_key`] cannot build a value for the key, as with
    /// [`PairKey`](crate::PairKey).
    ///
    /// # Examples
    ///
    /// ```
    /// use {
    ///     list_lookup::{ListLookupDictionary, MissingKey, Options},
    ///     std::borrow::Cow,
    /// };
    ///
    /// let options = Options::new().missing(MissingKey::CreateFromKey);
    /// let mut dict: ListLookupDictionary<u32, u32> = ListLookupDictionary::with_options(options).unwrap();
    /// assert_eq!(dict.item(&42).unwrap(), Cow::Borrowed(&42));
    /// assert!(dict.contains_key(&42));
    /// ```
    pub fn item(&mut self, key: &K) -> Result<Cow<'_, V>>
    where
        V: Clone + Default,
    {
        self.item_with(key, V::default)
    }

    /// Like [`item`](Self::item), but [`MissingKey::ReturnDefault`] yields the result
    /// of `default`.
    pub fn item_with<F>(&mut self, key: &K, default: F) -> Result<Cow<'_, V>>
    where
        V: Clone,
        F: FnOnce() -> V,
    {
        if let Some(index) = self.index_of_key(key) {
            return Ok(Cow::Borrowed(&self.store.values[index]));
        }
        match self.options.missing {
            MissingKey::Error => Err(Error::KeyNotFound),
            MissingKey::ReturnDefault => Ok(Cow::Owned(default())),
            MissingKey::CreateFromKey => {
                let value = self
                    .store
                    .policy
                    .create_from_key(key)
                    .ok_or(Error::KeyNotFound)?;
                let index = self.add_for_key(key, value)?;
                Ok(Cow::Borrowed(&self.store.values[index]))
            }
        }
    }

    /// Returns the first visible element with the given key, creating it with `factory`
    /// if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::{ListLookupDictionary, Options, PairKey, Slot};
    ///
    /// let mut dict: ListLookupDictionary<&str, (&str, usize), PairKey> =
    ///     ListLookupDictionary::with_options_and_policy(Options::new(), PairKey).unwrap();
    /// let (slot, _) = dict.find_or_create(&"a", 1, |k, n| (*k, n)).unwrap();
    /// assert_eq!(slot, Slot::Created(0));
    /// let (slot, v) = dict.find_or_create(&"a", 2, |k, n| (*k, n)).unwrap();
    /// assert_eq!(slot, Slot::Found(0));
    /// assert_eq!(*v, ("a", 1));
    /// ```
    pub fn find_or_create<A, F>(&mut self, key: &K, arg: A, factory: F) -> Result<(Slot, &mut V)>
    where
        F: FnOnce(&K, A) -> V,
    {
        if let Some(index) = self.index_of_key(key) {
            return Ok((Slot::Found(index), &mut self.store.values[index]));
        }
        let value = factory(key, arg);
        let index = self.add_for_key(key, value)?;
        Ok((Slot::Created(index), &mut self.store.values[index]))
    }

    fn add_for_key(&mut self, key: &K, value: V) -> Result<usize> {
        let own = self.key_of(&value, self.len())?;
        if !self.store.policy.key_eq(own, key) {
            return Err(Error::KeyMismatch);
        }
        self.add(value)
    }

    /// Returns an iterator over all visible elements with the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::{ListLookupDictionary, Options, PairKey};
    ///
    /// let mut dict: ListLookupDictionary<char, (char, u32), PairKey> =
    ///     ListLookupDictionary::with_options_and_policy(Options::new().non_unique(), PairKey).unwrap();
    /// dict.add_range([('a', 1), ('b', 2), ('a', 3)]).unwrap();
    /// let found: Vec<_> = dict.get_values(&'a').collect();
    /// assert_eq!(found, [(0, &('a', 1)), (2, &('a', 3))]);
    /// ```
    pub fn get_values<'a>(&'a self, key: &'a K) -> Lookup<'a, K, V, P, S> {
        Lookup::new(self, key)
    }

    /// Returns an iterator over the distinct keys of the visible elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::{ListLookupDictionary, Options};
    ///
    /// let mut dict: ListLookupDictionary<u32, u32> =
    ///     ListLookupDictionary::with_options(Options::new().non_unique()).unwrap();
    /// dict.add_range([3, 1, 3, 2, 1]).unwrap();
    /// assert_eq!(dict.distinct_keys().copied().collect::<Vec<_>>(), [3, 1, 2]);
    /// ```
    pub fn distinct_keys(&self) -> DistinctKeys<'_, K, V, P, S> {
        DistinctKeys::new(self)
    }

    /// Returns an iterator over the keys of the visible elements in array order.
    ///
    /// Keys of collections with [`Flags::NON_UNIQUE`](crate::Flags::NON_UNIQUE) can
    /// repeat. Use [`distinct_keys`](Self::distinct_keys) to skip repetitions.
    pub fn keys(&self) -> Keys<'_, K, V, P> {
        Keys::new(&self.store.values, &self.store.hidden, &self.store.policy)
    }

    /// Hides the element at `index` from key lookups.
    ///
    /// Returns `false` if the element was already hidden. The element keeps its slot
    /// and its key may be changed while it is hidden.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::ListLookupDictionary;
    ///
    /// let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    /// dict.hide_at(1).unwrap();
    /// assert!(!dict.contains_key(&2));
    /// assert_eq!(dict.len(), 3);
    /// dict.unhide_at(1, false).unwrap();
    /// assert_eq!(dict.index_of_key(&2), Some(1));
    /// ```
    pub fn hide_at(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        if self.is_hidden(index) {
            return Ok(false);
        }
        self.repr.unlink(&self.store, index);
        self.store.hidden.set(index, true);
        Ok(true)
    }

    /// Makes the hidden element at `index` visible again.
    ///
    /// Returns `false` if the element was not hidden. If keys are unique and another
    /// visible element has the same key, fails with [`Error::DuplicateKey`] and the
    /// element stays hidden.
    ///
    /// The key of the element is always derived anew. If `refresh_key` is set, the
    /// lookup structure is additionally rebuilt from the current keys of all elements,
    /// which repairs it after keys of visible elements were changed in place.
    pub fn unhide_at(&mut self, index: usize, refresh_key: bool) -> Result<bool> {
        self.check_index(index)?;
        if !self.is_hidden(index) {
            return Ok(false);
        }
        if let Some(key) = self.store.policy.key(&self.store.values[index]) {
            if self.options.is_unique() {
                if let Some(other) = self.repr.find(&self.store, key) {
                    return Err(Error::DuplicateKey { index: other });
                }
            }
        }
        self.store.hidden.set(index, false);
        if refresh_key {
            self.repr.rebuild(&self.store, self.store.values.capacity());
        } else {
            self.repr.link(&self.store, index);
        }
        Ok(true)
    }

    /// Replaces the backing array.
    ///
    /// All elements are visible afterwards. Keys are not checked for uniqueness.
    /// Observers and live indices see the old elements as removed.
    pub fn rebuild_data_structure(&mut self, values: Vec<V>) -> Result<Vec<V>> {
        let kind = self.kind_for(values.len())?;
        let old_len = self.len();
        let old = mem::replace(&mut self.store.values, values);
        self.store.hidden = BitSet::with_len(self.len());
        self.version += 1;
        self.relink_all(kind);
        self.notify(IndexChange::removed(0, old_len));
        Ok(old)
    }

    /// Changes the requested data structure.
    ///
    /// [`DataStructure::Auto`] lets the collection choose again. Fails with
    /// [`Error::FixedRepresentation`] if the collection was created with
    /// [`Flags::FIXED`](crate::Flags::FIXED) and `requested` differs from its data
    /// structure.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::{DataStructure, ListLookupDictionary};
    ///
    /// let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    /// dict.change_data_structure(DataStructure::Hash64k).unwrap();
    /// assert_eq!(dict.data_structure(), DataStructure::Hash64k);
    /// assert!(dict.change_data_structure(DataStructure::Hash).is_err());
    /// ```
    pub fn change_data_structure(&mut self, requested: DataStructure) -> Result<()> {
        if self.options.is_fixed() && requested != self.options.data_structure {
            return Err(Error::FixedRepresentation {
                current: self.repr.kind(),
                requested,
            });
        }
        let kind = choose(requested, self.len())?;
        self.options.data_structure = requested;
        if kind != self.repr.kind() {
            self.switch(kind);
        }
        Ok(())
    }

    /// Sets the capacity of the backing array.
    ///
    /// Fails if `capacity` is less than [`len`](Self::len).
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        let len = self.len();
        if capacity < len {
            return Err(Error::ArgumentRange {
                what: "capacity",
                value: capacity,
                limit: len,
            });
        }
        if capacity > self.store.values.capacity() {
            self.store.values.reserve_exact(capacity - len);
        } else {
            self.store.values.shrink_to(capacity);
        }
        self.repr.reserve(&self.store, capacity);
        Ok(())
    }

    /// Shrinks the backing array and the lookup structure to fit the elements.
    pub fn trim_excess(&mut self) {
        self.store.values.shrink_to_fit();
        self.store.hidden.shrink_to_fit();
        self.repr.rebuild(&self.store, self.len());
    }

    /// Removes all elements and keeps the allocated memory.
    pub fn clear(&mut self) {
        self.clear_with(false);
    }

    /// Removes all elements, releasing the allocated memory if `trim_excess` is set.
    pub fn clear_with(&mut self, trim_excess: bool) {
        let old_len = self.len();
        self.store.values.clear();
        self.store.hidden.clear();
        if trim_excess {
            self.store.values.shrink_to_fit();
            self.store.hidden.shrink_to_fit();
        }
        self.version += 1;
        let kind = self.kind_after_shrink(0);
        self.relink_all(kind);
        self.notify(IndexChange::removed(0, old_len));
    }

    /// Creates a copy of this collection.
    ///
    /// With `options`, the copy uses those options and rebuilds its lookup structure.
    /// With `carry_observers`, the copy is created with the same index-change observers.
    /// Live indices are never carried.
    pub fn clone_with(&self, options: Option<Options>, carry_observers: bool) -> Result<Self>
    where
        V: Clone,
        P: Clone,
        S: Clone,
    {
        let mut copy = match options {
            Some(options) if options != self.options => Self::build(
                self.store.values.clone(),
                Some(self.store.hidden.clone()),
                options,
                self.store.policy.clone(),
                self.store.hasher.clone(),
            )?,
            _ => self.clone_plain(),
        };
        if carry_observers {
            copy.changes = self.changes.as_ref().and_then(|c| c.clone_observers());
        }
        Ok(copy)
    }
}

impl<K, V, P, S> ListLookupDictionary<K, V, P, S>
where
    V: Clone,
    P: Clone,
    S: Clone,
{
    /// Copies the contents and the lookup structure without observers.
    pub(crate) fn clone_plain(&self) -> Self {
        Self {
            store: Store::with_hidden(
                self.store.values.clone(),
                self.store.hidden.clone(),
                self.store.policy.clone(),
                self.store.hasher.clone(),
            ),
            repr: self.repr.clone(),
            options: self.options,
            version: 0,
            changes: None,
            owner: OwnerId::next(),
        }
    }
}
