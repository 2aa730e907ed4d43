/// A vector of single-bit flags addressed by dense index, such as the slot
/// index of a [`Handle`](crate::Handle).
///
/// The vector grows as indices are set, but never shrinks. Reading past the
/// end yields `false`, so a fresh `FlagVec` behaves as "nothing marked".
#[derive(Clone, Default)]
pub struct FlagVec {
    words: Vec<u64>,
    length: usize,
}

const WORD_BITS: usize = u64::BITS as usize;

impl FlagVec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a vector with room for `bits` flags before it reallocates.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(bits.div_ceil(WORD_BITS)),
            length: 0,
        }
    }

    /// Returns the index of the highest set bit + 1. This value is 'sticky' and
    /// will never decrease, even if that bit is later cleared.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if no flag has ever been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Sets the flag at the given index to the given value, and returns the old
    /// value.
    pub fn set(&mut self, index: usize, value: bool) -> bool {
        let (word, bit) = (index / WORD_BITS, index % WORD_BITS);

        if word >= self.words.len() {
            if !value {
                return false;
            }
            self.words.resize(word + 1, 0);
        }

        if value {
            self.length = self.length.max(index + 1);
        }

        let mask = 1u64 << bit;
        let old = self.words[word] & mask != 0;
        if value {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
        old
    }

    /// Returns the value of the flag at the given index, or false if the index
    /// is out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .map_or(false, |word| word & (1 << (index % WORD_BITS)) != 0)
    }

    /// Clears every flag without releasing storage.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|word| *word = 0);
        self.length = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanity() {
        let mut vec = FlagVec::new();

        assert_eq!(vec.len(), 0);
        assert!(!vec.get(0));
        assert!(!vec.get(1_000_000));

        assert!(!vec.set(0, true));
        assert_eq!(vec.len(), 1);

        vec.set(1_000_000, true);
        assert_eq!(vec.len(), 1_000_001);
        assert_eq!(vec.words.len(), 1_000_000 / 64 + 1);

        assert!(vec.set(1_000_000, false));
        assert!(!vec.get(1_000_000));
        assert_eq!(vec.len(), 1_000_001);
    }

    #[test]
    fn clearing_unset_bit_does_not_grow() {
        let mut vec = FlagVec::with_capacity(8);

        assert!(!vec.set(500, false));
        assert!(vec.words.is_empty());
        assert!(vec.is_empty());
    }

    #[test]
    fn clear_resets_marks() {
        let mut vec = FlagVec::new();

        vec.set(3, true);
        vec.set(64, true);
        vec.clear();

        assert!(!vec.get(3));
        assert!(!vec.get(64));
        assert!(vec.is_empty());
    }
}
