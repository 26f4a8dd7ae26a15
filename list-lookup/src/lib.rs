//! A list, dictionary and multi-value lookup over a single array.
//!
//! [`ListLookupDictionary`] stores values in a dense array and derives each value's key
//! through a [`KeyPolicy`]. Small collections look keys up by scanning the array,
//! larger ones through a compact hash table with 16-bit links. The switch happens
//! automatically unless a data structure is requested explicitly.
//!
//! Elements can be hidden from key lookups without moving them, and [`LiveIndex`]
//! handles follow elements as other elements are inserted and removed.
//!
//! # Example
//!
//! A collection shared between threads behind a mutex:
//!
//! ```
//! use {
//!     list_lookup::{ListLookupDictionary, Options, PairKey},
//!     parking_lot::Mutex,
//!     std::{sync::Arc, thread},
//! };
//!
//! type Sessions = ListLookupDictionary<u64, (u64, &'static str), PairKey>;
//!
//! let sessions = Arc::new(Mutex::new(
//!     Sessions::with_options_and_policy(Options::new(), PairKey).unwrap(),
//! ));
//! let workers: Vec<_> = (0..4)
//!     .map(|id| {
//!         let sessions = sessions.clone();
//!         thread::spawn(move || {
//!             sessions.lock().add((id, "connected")).unwrap();
//!         })
//!     })
//!     .collect();
//! for worker in workers {
//!     worker.join().unwrap();
//! }
//! let sessions = sessions.lock();
//! assert_eq!(sessions.len(), 4);
//! assert!((0..4).all(|id| sessions.contains_key(&id)));
//! ```

#![no_std]
extern crate alloc;

mod bitset;
mod clone;
mod cursor;
mod debug;
mod default;
mod dict;
mod distinct_keys;
mod eq;
mod error;
mod extend;
mod from;
mod from_iterator;
mod index;
mod into_iter;
mod iter;
mod key;
mod live_index;
mod lookup;
mod options;
mod owner;
mod repr;
#[cfg(feature = "serde")]
mod serialize;
mod store;

pub use {
    cursor::Cursor,
    dict::{ListLookupDictionary, Slot},
    distinct_keys::DistinctKeys,
    error::{Error, Result},
    into_iter::IntoIter,
    iter::{Iter, Keys, Values},
    key::{FnKey, HasKey, HasKeyPolicy, KeyPolicy, PairKey, SelfKey},
    live_index::{IndexChange, LiveIndex, SubscriptionId},
    lookup::Lookup,
    options::{DataStructure, Flags, MissingKey, Options, HASH64K_MAX, LIST_MAX},
};
