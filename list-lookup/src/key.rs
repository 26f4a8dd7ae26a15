#[cfg(test)]
mod tests;

use core::hash::{BuildHasher, Hash};

/// Derives keys from stored values.
///
/// A [`ListLookupDictionary`](crate::ListLookupDictionary) never stores keys separately.
/// Every lookup extracts the key from the value through this trait, which also defines
/// hashing and equality of keys and values. The provided implementations forward to
/// [`Hash`], [`Eq`] and [`PartialEq`].
///
/// The key of a value must not change while the value is visible in a collection. Hide
/// the element with [`hide_at`](crate::ListLookupDictionary::hide_at) before modifying
/// its key and unhide it with `refresh_key` set afterwards.
pub trait KeyPolicy<K, V> {
    /// Returns the key of `value`.
    ///
    /// Returns `None` if this value has no key. Such values are rejected by checked
    /// insertions with [`Error::UnsupportedKeyShape`](crate::Error::UnsupportedKeyShape)
    /// and are never found by lookups.
    fn key<'a>(&self, value: &'a V) -> Option<&'a K>;

    /// Hashes a key.
    fn hash_key<S>(&self, hasher: &S, key: &K) -> u64
    where
        K: Hash,
        S: BuildHasher,
    {
        hasher.hash_one(key)
    }

    /// Compares two keys.
    fn key_eq(&self, a: &K, b: &K) -> bool
    where
        K: Eq,
    {
        a == b
    }

    /// Compares two values.
    fn value_eq(&self, a: &V, b: &V) -> bool
    where
        V: PartialEq,
    {
        a == b
    }

    /// Creates a value for a key that is not present.
    ///
    /// Used by [`MissingKey::CreateFromKey`](crate::MissingKey::CreateFromKey). The
    /// key of the returned value must be equal to `key`.
    fn create_from_key(&self, key: &K) -> Option<V> {
        let _ = key;
        None
    }
}

/// A value that carries its own key.
pub trait HasKey<K> {
    /// Returns the key of this value.
    fn key(&self) -> &K;

    /// Creates a value with the given key, if this type supports it.
    fn from_key(key: &K) -> Option<Self>
    where
        Self: Sized,
    {
        let _ = key;
        None
    }
}

/// Values are their own keys.
///
/// # Examples
///
/// ```
/// use list_lookup::ListLookupDictionary;
///
/// let mut dict = ListLookupDictionary::<u32, u32>::new();
/// dict.add(5).unwrap();
/// assert!(dict.contains_key(&5));
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct SelfKey;

impl<K> KeyPolicy<K, K> for SelfKey
where
    K: Clone,
{
    #[inline]
    fn key<'a>(&self, value: &'a K) -> Option<&'a K> {
        Some(value)
    }

    fn create_from_key(&self, key: &K) -> Option<K> {
        Some(key.clone())
    }
}

/// Values are `(key, payload)` pairs.
///
/// # Examples
///
/// ```
/// use list_lookup::{ListLookupDictionary, Options, PairKey};
///
/// let mut dict: ListLookupDictionary<&str, (&str, u32), PairKey> =
///     ListLookupDictionary::with_options_and_policy(Options::new(), PairKey).unwrap();
/// dict.add(("a", 1)).unwrap();
/// assert_eq!(dict.get(&"a"), Some(&("a", 1)));
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct PairKey;

impl<K, T> KeyPolicy<K, (K, T)> for PairKey {
    #[inline]
    fn key<'a>(&self, value: &'a (K, T)) -> Option<&'a K> {
        Some(&value.0)
    }
}

/// Values implement [`HasKey`].
#[derive(Copy, Clone, Debug, Default)]
pub struct HasKeyPolicy;

impl<K, V> KeyPolicy<K, V> for HasKeyPolicy
where
    V: HasKey<K>,
{
    #[inline]
    fn key<'a>(&self, value: &'a V) -> Option<&'a K> {
        Some(value.key())
    }

    fn create_from_key(&self, key: &K) -> Option<V> {
        V::from_key(key)
    }
}

/// Keys are extracted by a function.
///
/// The function may return `None` for values that have no key.
///
/// # Examples
///
/// ```
/// use list_lookup::{FnKey, ListLookupDictionary, Options};
///
/// struct User {
///     id: u64,
///     name: &'static str,
/// }
///
/// fn user_id(user: &User) -> Option<&u64> {
///     Some(&user.id)
/// }
///
/// let mut users: ListLookupDictionary<u64, User, _> =
///     ListLookupDictionary::with_options_and_policy(Options::new(), FnKey::new(user_id)).unwrap();
/// users.add(User { id: 7, name: "ada" }).unwrap();
/// assert_eq!(users.get(&7).map(|u| u.name), Some("ada"));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct FnKey<F>(F);

impl<F> FnKey<F> {
    /// Wraps a key accessor.
    pub fn new<K, V>(f: F) -> Self
    where
        F: for<'a> Fn(&'a V) -> Option<&'a K>,
    {
        Self(f)
    }
}

impl<K, V, F> KeyPolicy<K, V> for FnKey<F>
where
    F: for<'a> Fn(&'a V) -> Option<&'a K>,
{
    #[inline]
    fn key<'a>(&self, value: &'a V) -> Option<&'a K> {
        (self.0)(value)
    }
}
