
use {
    crate::{
        error::{Error, Result},
        owner::OwnerId,
        ListLookupDictionary,
    },
    alloc::{boxed::Box, sync::Arc, vec::Vec},
    core::{
        fmt::{Debug, Formatter},
        hash::{BuildHasherDefault, Hasher},
        sync::atomic::{AtomicIsize, Ordering::Relaxed},
    },
    hashbrown::HashMap,
    smallvec::SmallVec,
};

const REMOVED: isize = -1;
const CLOSED: isize = -2;

/// Describes a contiguous run of elements that changed position.
///
/// Elements `old_index..old_index + count` were either removed (`new_index` is `None`)
/// or moved to `new_index..new_index + count`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IndexChange {
    /// The first index of the run before the change.
    pub old_index: usize,
    /// The first index of the run after the change, or `None` if the run was removed.
    pub new_index: Option<usize>,
    /// The length of the run.
    pub count: usize,
}

impl IndexChange {
    pub(crate) fn removed(index: usize, count: usize) -> Self {
        Self {
            old_index: index,
            new_index: None,
            count,
        }
    }

    pub(crate) fn moved(from: usize, to: usize, count: usize) -> Self {
        Self {
            old_index: from,
            new_index: Some(to),
            count,
        }
    }
}

/// Identifies an index-change observer registered with
/// [`subscribe`](ListLookupDictionary::subscribe).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(&IndexChange) + Send + Sync>;

#[derive(Debug)]
struct LiveSlot {
    owner: OwnerId,
    index: AtomicIsize,
}

impl LiveSlot {
    #[inline]
    fn get(&self) -> isize {
        self.index.load(Relaxed)
    }

    #[inline]
    fn set(&self, index: isize) {
        self.index.store(index, Relaxed)
    }

    #[inline]
    fn position(&self) -> Option<usize> {
        usize::try_from(self.get()).ok()
    }
}

/// A handle that follows an element as it moves within a collection.
///
/// Created by [`open_live_index`](ListLookupDictionary::open_live_index). Whenever the
/// collection moves the element, the handle is updated. If the element is removed,
/// [`index`](Self::index) returns `None` and [`is_removed`](Self::is_removed) returns
/// `true`.
///
/// Dropping the handle releases it lazily. Use
/// [`close_live_index`](ListLookupDictionary::close_live_index) to release it
/// immediately. All operations on a closed handle are no-ops.
///
/// # Examples
///
/// ```
/// use list_lookup::ListLookupDictionary;
///
/// let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3, 4].into();
/// let handle = dict.open_live_index(3).unwrap();
/// dict.remove_range(0, 2).unwrap();
/// assert_eq!(handle.index(), Some(1));
/// assert_eq!(handle.value(&dict), Some(&4));
/// dict.remove_at(1).unwrap();
/// assert!(handle.is_removed());
/// ```
pub struct LiveIndex {
    slot: Arc<LiveSlot>,
}

impl LiveIndex {
    /// Returns the current index of the tracked element.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.slot.position()
    }

    /// Returns whether the tracked element has been removed from the collection.
    pub fn is_removed(&self) -> bool {
        self.slot.get() == REMOVED
    }

    /// Returns whether the handle has been closed or its collection dropped.
    pub fn is_closed(&self) -> bool {
        self.slot.get() == CLOSED
    }

    /// Returns the tracked element.
    ///
    /// Returns `None` if the element was removed, the handle was closed, or `dict` is
    /// not the collection that created this handle.
    pub fn value<'a, K, V, P, S>(&self, dict: &'a ListLookupDictionary<K, V, P, S>) -> Option<&'a V> {
        if self.slot.owner != dict.owner {
            return None;
        }
        dict.store.values.get(self.index()?)
    }

    /// Makes the handle track a different position.
    ///
    /// This only updates the bookkeeping, no element is moved.
    pub fn set_index<K, V, P, S>(
        &self,
        dict: &mut ListLookupDictionary<K, V, P, S>,
        index: usize,
    ) -> Result<()> {
        dict.set_live_index(self, index)
    }
}

impl Debug for LiveIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LiveIndex")
            .field("index", &self.slot.get())
            .finish()
    }
}

/// Multiplicative hashing for positions.
#[derive(Default)]
struct PositionHasher(u64);

impl Hasher for PositionHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0.rotate_left(8) ^ b as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        }
    }

    fn write_usize(&mut self, n: usize) {
        self.0 = (n as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
    }
}

/// Table size below which dropped handles are only purged per position.
const MIN_SWEEP: usize = 64;

type Tracked = HashMap<usize, SmallVec<[Arc<LiveSlot>; 1]>, BuildHasherDefault<PositionHasher>>;

/// Observers and live indices of one collection.
///
/// Created on first use of either feature.
//
// Invariants:
//
// - Every slot in `tracked` is stored under its current position.
// - `tracked_len` is the total number of slots in `tracked`.
// - Removed and closed slots are not tracked.
// - tracked_len <= sweep_at, except transiently inside track.
#[derive(Default)]
pub(crate) struct IndexChangeManager {
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    tracked: Tracked,
    tracked_len: usize,
    sweep_at: usize,
}

impl IndexChangeManager {
    /// Returns a manager with the same observers and no live indices.
    pub fn clone_observers(&self) -> Option<Box<Self>> {
        if self.observers.is_empty() {
            return None;
        }
        Some(Box::new(Self {
            observers: self.observers.clone(),
            next_subscription: self.next_subscription,
            tracked: Tracked::default(),
            tracked_len: 0,
            sweep_at: 0,
        }))
    }

    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len = self.observers.len();
        self.observers.retain(|(i, _)| *i != id);
        self.observers.len() != len
    }

    pub fn live_count(&self) -> usize {
        self.tracked
            .values()
            .flatten()
            .filter(|slot| Arc::strong_count(slot) > 1)
            .count()
    }

    fn track(&mut self, slot: Arc<LiveSlot>) {
        let Some(pos) = slot.position() else {
            return;
        };
        let slots = self.tracked.entry(pos).or_default();
        let before = slots.len();
        slots.retain(|s| Arc::strong_count(s) > 1);
        let purged = before - slots.len();
        slots.push(slot);
        self.tracked_len = self.tracked_len - purged + 1;
        if self.tracked_len > self.sweep_at {
            self.sweep();
        }
    }

    /// Drops slots whose handle is gone from the whole table.
    fn sweep(&mut self) {
        self.tracked.retain(|_, slots| {
            slots.retain(|s| Arc::strong_count(s) > 1);
            !slots.is_empty()
        });
        self.tracked_len = self.tracked.values().map(|slots| slots.len()).sum();
        self.sweep_at = (self.tracked_len * 2).max(MIN_SWEEP);
    }

    fn untrack(&mut self, slot: &Arc<LiveSlot>) -> bool {
        let Some(pos) = slot.position() else {
            return false;
        };
        let Some(slots) = self.tracked.get_mut(&pos) else {
            return false;
        };
        let Some(i) = slots.iter().position(|s| Arc::ptr_eq(s, slot)) else {
            return false;
        };
        slots.swap_remove(i);
        if slots.is_empty() {
            self.tracked.remove(&pos);
        }
        self.tracked_len -= 1;
        true
    }

    /// Reports a change to all observers and updates all affected live indices.
    pub fn notify(&mut self, change: IndexChange) {
        if change.count == 0 {
            return;
        }
        for (_, observer) in &self.observers {
            observer(&change);
        }
        self.propagate(&change);
    }

    fn propagate(&mut self, change: &IndexChange) {
        if self.tracked_len == 0 {
            return;
        }
        let start = change.old_index;
        let end = start + change.count;
        let mut affected = Vec::new();
        if change.count <= self.tracked.len() {
            for pos in start..end {
                if let Some(slots) = self.tracked.remove(&pos) {
                    affected.extend(slots);
                }
            }
        } else {
            for (_, slots) in self.tracked.extract_if(|pos, _| (start..end).contains(pos)) {
                affected.extend(slots);
            }
        }
        if affected.is_empty() {
            return;
        }
        let total = self.tracked_len;
        self.tracked_len -= affected.len();
        let Some(new_start) = change.new_index else {
            for slot in &affected {
                slot.set(REMOVED);
            }
            return;
        };
        for slot in &affected {
            let pos = slot.get() as usize;
            slot.set((pos - start + new_start) as isize);
        }
        if affected.len() * 4 > total {
            self.refresh(affected);
        } else {
            for slot in affected {
                if Arc::strong_count(&slot) > 1 {
                    self.track(slot);
                }
            }
        }
    }

    /// Re-keys every tracked slot in one pass and drops slots whose handle is gone.
    fn refresh(&mut self, moved: Vec<Arc<LiveSlot>>) {
        let mut all: Vec<_> = self.tracked.drain().flat_map(|(_, slots)| slots).collect();
        all.extend(moved);
        log::trace!("refreshing {} live indices", all.len());
        self.tracked_len = 0;
        for slot in all {
            if Arc::strong_count(&slot) > 1 {
                self.track(slot);
            }
        }
    }
}

impl Drop for IndexChangeManager {
    fn drop(&mut self) {
        for slot in self.tracked.values().flatten() {
            slot.set(CLOSED);
        }
    }
}

impl<K, V, P, S> ListLookupDictionary<K, V, P, S> {
    pub(crate) fn change_manager(&mut self) -> &mut IndexChangeManager {
        self.changes.get_or_insert_with(Default::default)
    }

    pub(crate) fn notify(&mut self, change: IndexChange) {
        if let Some(changes) = &mut self.changes {
            changes.notify(change);
        }
    }

    /// Starts tracking the element at `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_lookup::ListLookupDictionary;
    ///
    /// let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    /// let handle = dict.open_live_index(2).unwrap();
    /// dict.insert(0, 0).unwrap();
    /// assert_eq!(handle.index(), Some(3));
    /// assert!(dict.open_live_index(4).is_err());
    /// ```
    pub fn open_live_index(&mut self, index: usize) -> Result<LiveIndex> {
        let len = self.len();
        if index >= len {
            return Err(Error::ArgumentRange {
                what: "index",
                value: index,
                limit: len,
            });
        }
        let slot = Arc::new(LiveSlot {
            owner: self.owner,
            index: AtomicIsize::new(index as isize),
        });
        self.change_manager().track(slot.clone());
        Ok(LiveIndex { slot })
    }

    /// Stops tracking a live index.
    ///
    /// Closing a handle twice is a no-op. Returns [`Error::Ownership`] if the handle was
    /// created by a different collection.
    pub fn close_live_index(&mut self, handle: &LiveIndex) -> Result<()> {
        if handle.slot.owner != self.owner {
            return Err(Error::Ownership);
        }
        if let Some(changes) = &mut self.changes {
            changes.untrack(&handle.slot);
        }
        handle.slot.set(CLOSED);
        Ok(())
    }

    /// Makes a live index track a different position.
    ///
    /// A removed handle starts tracking again. A closed handle is left alone.
    pub fn set_live_index(&mut self, handle: &LiveIndex, index: usize) -> Result<()> {
        if handle.slot.owner != self.owner {
            return Err(Error::Ownership);
        }
        if handle.is_closed() {
            return Ok(());
        }
        let len = self.len();
        if index >= len {
            return Err(Error::ArgumentRange {
                what: "index",
                value: index,
                limit: len,
            });
        }
        let changes = self.change_manager();
        changes.untrack(&handle.slot);
        handle.slot.set(index as isize);
        changes.track(handle.slot.clone());
        Ok(())
    }

    /// Returns the number of open live indices whose handle is still alive.
    pub fn live_index_count(&self) -> usize {
        self.changes.as_ref().map_or(0, |c| c.live_count())
    }

    /// Registers a function that is called whenever elements change position.
    ///
    /// The function runs synchronously inside the mutating call, after the array has
    /// been updated. Observers are called in registration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use {
    ///     list_lookup::{IndexChange, ListLookupDictionary},
    ///     std::sync::{Arc, Mutex},
    /// };
    ///
    /// let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let seen2 = seen.clone();
    /// dict.subscribe(move |c| seen2.lock().unwrap().push(*c));
    /// dict.remove_at(0).unwrap();
    /// assert_eq!(
    ///     *seen.lock().unwrap(),
    ///     [IndexChange { old_index: 0, new_index: None, count: 1 },
    ///      IndexChange { old_index: 2, new_index: Some(0), count: 1 }],
    /// );
    /// ```
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&IndexChange) + Send + Sync + 'static,
    {
        self.change_manager().subscribe(Arc::new(observer))
    }

    /// Removes an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.changes.as_mut().is_some_and(|c| c.unsubscribe(id))
    }
}
