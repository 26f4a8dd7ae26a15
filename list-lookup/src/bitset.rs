
use alloc::vec::Vec;

const BITS: usize = u64::BITS as usize;

/// A growable bit vector that mirrors the layout of a `Vec`.
///
/// Used to mark hidden slots and the slots already visited by distinct-key enumeration.
/// Most collections never hide anything, so shifting operations are free while no bit
/// is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct BitSet {
    words: Vec<u64>,
    len: usize,
    ones: usize,
}

impl BitSet {
    pub fn with_len(len: usize) -> Self {
        Self {
            words: alloc::vec![0; len.div_ceil(BITS)],
            len,
            ones: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of set bits.
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.ones
    }

    #[inline]
    pub fn get(&self, index: usize) -> bool {
        if self.ones == 0 || index >= self.len {
            return false;
        }
        self.words[index / BITS] & (1 << (index % BITS)) != 0
    }

    /// Sets a bit and returns whether it changed.
    pub fn set(&mut self, index: usize, value: bool) -> bool {
        debug_assert!(index < self.len);
        let word = &mut self.words[index / BITS];
        let mask = 1 << (index % BITS);
        let old = *word & mask != 0;
        if old == value {
            return false;
        }
        if value {
            *word |= mask;
            self.ones += 1;
        } else {
            *word &= !mask;
            self.ones -= 1;
        }
        true
    }

    pub fn push(&mut self, value: bool) {
        self.resize(self.len + 1);
        if value {
            self.set(self.len - 1, true);
        }
    }

    /// Inserts a bit at `index`, shifting all following bits up.
    pub fn insert(&mut self, index: usize, value: bool) {
        debug_assert!(index <= self.len);
        self.resize(self.len + 1);
        if self.ones > 0 {
            for i in (index + 1..self.len).rev() {
                let prev = self.get(i - 1);
                self.set(i, prev);
            }
            self.set(index, false);
        }
        if value {
            self.set(index, true);
        }
    }

    /// Removes `count` bits starting at `index`, shifting all following bits down.
    pub fn remove_range(&mut self, index: usize, count: usize) {
        debug_assert!(index + count <= self.len);
        if self.ones > 0 {
            for i in index..self.len - count {
                let next = self.get(i + count);
                self.set(i, next);
            }
        }
        self.truncate(self.len - count);
    }

    /// Moves the last bit to `index` and removes the last bit.
    pub fn swap_remove(&mut self, index: usize) {
        debug_assert!(index < self.len);
        let last = self.len - 1;
        if index != last {
            let moved = self.get(last);
            self.set(index, moved);
        }
        self.truncate(last);
    }

    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        for i in len..self.len {
            self.set(i, false);
        }
        self.len = len;
        self.words.truncate(len.div_ceil(BITS));
    }

    pub fn resize(&mut self, len: usize) {
        if len < self.len {
            self.truncate(len);
        } else {
            self.len = len;
            self.words.resize(len.div_ceil(BITS), 0);
        }
    }

    pub fn clear(&mut self) {
        self.words.clear();
        self.len = 0;
        self.ones = 0;
    }

    pub fn shrink_to_fit(&mut self) {
        self.words.shrink_to_fit();
    }
}
