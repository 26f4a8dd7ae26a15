use {
    crate::{
        options::HASH64K_MAX,
        repr::{primes, Strategy},
        store::KeySource,
    },
    alloc::vec::Vec,
};

const END: u16 = 0;
const MIN_BUCKETS: usize = 3;

/// A chained hash table whose links are 16-bit slot numbers.
///
/// `buckets[h]` holds the first slot of the chain for bucket `h` and `next[i]` holds
/// the slot following slot `i`. Slot `i` is encoded as `i + 1` so that `0` can mark the
/// end of a chain. This caps the table at [`HASH64K_MAX`] elements.
///
/// Chains are kept in ascending slot order, so the first match of a key is its lowest
/// visible slot, as with a linear scan.
///
/// Only visible slots with a key are linked. The facade unlinks a slot before hiding
/// it, so the key of a hidden value may change freely.
///
/// The bucket count is a prime from [`primes::next_prime`]. The table is rebuilt from
/// scratch whenever the element count exceeds the bucket count.
#[derive(Clone, Debug, Default)]
pub(crate) struct Hash64k {
    buckets: Vec<u16>,
    next: Vec<u16>,
}

impl Hash64k {
    #[inline]
    fn bucket(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    #[inline]
    fn encode(index: usize) -> u16 {
        debug_assert!(index < HASH64K_MAX);
        (index + 1) as u16
    }

    /// Returns the number of buckets.
    #[cfg(test)]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn link_unchecked<K, T>(&mut self, keys: &T, index: usize)
    where
        T: KeySource<K> + ?Sized,
    {
        let key = match keys.key(index) {
            Some(key) if !keys.is_hidden(index) => key,
            _ => {
                self.next[index] = END;
                return;
            }
        };
        let bucket = self.bucket(keys.hash(key));
        let target = Self::encode(index);
        let head = self.buckets[bucket];
        if head == END || head > target {
            self.next[index] = head;
            self.buckets[bucket] = target;
            return;
        }
        let mut cur = head as usize - 1;
        loop {
            let next = self.next[cur];
            if next == END || next > target {
                self.next[index] = next;
                self.next[cur] = target;
                return;
            }
            cur = next as usize - 1;
        }
    }
}

impl Strategy for Hash64k {
    #[inline]
    fn first_probe<K, T>(&self, keys: &T, key: &K) -> usize
    where
        T: KeySource<K> + ?Sized,
    {
        if self.buckets.is_empty() {
            return END as usize;
        }
        self.buckets[self.bucket(keys.hash(key))] as usize
    }

    fn next_match<K, T>(&self, keys: &T, key: &K, probe: &mut usize) -> Option<usize>
    where
        T: KeySource<K> + ?Sized,
    {
        while *probe != END as usize {
            let index = *probe - 1;
            *probe = self.next[index] as usize;
            if keys.matches(index, key) {
                return Some(index);
            }
        }
        None
    }

    fn link<K, T>(&mut self, keys: &T, index: usize)
    where
        T: KeySource<K> + ?Sized,
    {
        let len = keys.len();
        debug_assert!(len <= HASH64K_MAX);
        if len > self.buckets.len() {
            self.rebuild(keys, len.saturating_mul(2));
            return;
        }
        if self.next.len() < len {
            self.next.resize(len, END);
        }
        self.link_unchecked(keys, index);
    }

    fn unlink<K, T>(&mut self, keys: &T, index: usize)
    where
        T: KeySource<K> + ?Sized,
    {
        if self.buckets.is_empty() || index >= self.next.len() {
            return;
        }
        let Some(key) = keys.key(index) else {
            return;
        };
        let bucket = self.bucket(keys.hash(key));
        let target = Self::encode(index);
        let mut cur = self.buckets[bucket];
        if cur == target {
            self.buckets[bucket] = self.next[index];
        } else {
            while cur != END {
                let c = cur as usize - 1;
                if self.next[c] == target {
                    self.next[c] = self.next[index];
                    break;
                }
                cur = self.next[c];
            }
        }
        self.next[index] = END;
    }

    fn truncate(&mut self, len: usize) {
        self.next.truncate(len);
    }

    fn rebuild<K, T>(&mut self, keys: &T, capacity: usize)
    where
        T: KeySource<K> + ?Sized,
    {
        let len = keys.len();
        debug_assert!(len <= HASH64K_MAX);
        let size = primes::next_prime(capacity.min(HASH64K_MAX).max(len).max(MIN_BUCKETS));
        self.buckets.clear();
        self.buckets.resize(size, END);
        self.next.clear();
        self.next.resize(len, END);
        // In reverse, every slot becomes the head of its chain.
        for index in (0..len).rev() {
            self.link_unchecked(keys, index);
        }
        log::trace!("rehashed {len} elements into {size} buckets");
    }

    fn reserve<K, T>(&mut self, keys: &T, capacity: usize)
    where
        T: KeySource<K> + ?Sized,
    {
        if capacity.min(HASH64K_MAX) > self.buckets.len() {
            self.rebuild(keys, capacity);
        }
    }
}
