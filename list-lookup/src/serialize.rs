#[cfg(test)]
mod tests;

use {
    crate::{key::KeyPolicy, options::Options, ListLookupDictionary},
    alloc::vec::Vec,
    core::{
        fmt::Formatter,
        hash::{BuildHasher, Hash},
        marker::PhantomData,
    },
    serde::{
        de::{self, SeqAccess, Visitor},
        ser::SerializeSeq,
        Deserialize, Deserializer, Serialize, Serializer,
    },
};

/// Serializes all elements, including hidden elements, as a sequence.
impl<K, V, P, H> Serialize for ListLookupDictionary<K, V, P, H>
where
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self.raw_values() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

/// Deserializes a sequence without checking keys.
impl<'de, K, V, P, S> Deserialize<'de> for ListLookupDictionary<K, V, P, S>
where
    K: Eq + Hash,
    V: Deserialize<'de>,
    P: KeyPolicy<K, V> + Default,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = deserializer.deserialize_seq(Vis(PhantomData))?;
        Self::from_values(values, Options::new(), P::default(), S::default())
            .map_err(de::Error::custom)
    }
}

struct Vis<V>(PhantomData<fn() -> V>);

impl<'de, V> Visitor<'de> for Vis<V>
where
    V: Deserialize<'de>,
{
    type Value = Vec<V>;

    fn expecting(&self, formatter: &mut Formatter) -> core::fmt::Result {
        write!(formatter, "a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(value) = seq.next_element()? {
            values.push(value);
        }
        Ok(values)
    }
}
