use core::sync::atomic::{AtomicUsize, Ordering::Relaxed};

/// Identifies the collection that created a handle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct OwnerId(usize);

impl OwnerId {
    /// Returns a new, unique id.
    pub fn next() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        Self(NEXT.fetch_add(1, Relaxed))
    }
}
