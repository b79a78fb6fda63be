//! Bit-vector set of mated feature ids.
//!
//! [`MatedSet`] is the identity of a planning state: two states are the same
//! configuration exactly when their mated sets are equal. Sets are values;
//! [`MatedSet::with`] returns a new set and leaves the original untouched, so
//! sibling branches of a search never observe each other's progress.

use crate::ids::FeatureId;

const WORD_BITS: usize = 64;

/// Fixed-capacity set of feature ids.
///
/// # Example
///
/// ```
/// use assembly_types::{FeatureId, MatedSet};
///
/// let empty = MatedSet::new(10);
/// let next = empty.with([FeatureId::new(2), FeatureId::new(7)]);
///
/// assert!(empty.is_empty());
/// assert_eq!(next.len(), 2);
/// assert!(next.contains(FeatureId::new(7)));
/// assert!(next.is_superset(&empty));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatedSet {
    words: Vec<u64>,
    capacity: usize,
}

impl MatedSet {
    /// Create an empty set able to hold ids `0..capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
            capacity,
        }
    }

    /// Create a set holding the given ids.
    ///
    /// Ids at or beyond `capacity` are ignored.
    #[must_use]
    pub fn from_ids(capacity: usize, ids: impl IntoIterator<Item = FeatureId>) -> Self {
        let mut set = Self::new(capacity);
        for id in ids {
            set.insert(id);
        }
        set
    }

    /// Get the number of ids this set can hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check whether `id` is in the set.
    #[must_use]
    pub fn contains(&self, id: FeatureId) -> bool {
        let index = id.index();
        index < self.capacity && self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    /// Return a copy of this set with `ids` added.
    #[must_use]
    pub fn with(&self, ids: impl IntoIterator<Item = FeatureId>) -> Self {
        let mut next = self.clone();
        for id in ids {
            next.insert(id);
        }
        next
    }

    fn insert(&mut self, id: FeatureId) {
        let index = id.index();
        if index < self.capacity {
            self.words[index / WORD_BITS] |= 1 << (index % WORD_BITS);
        }
    }

    /// Get the number of ids in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Check whether every id of `other` is also in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other
            .words
            .iter()
            .enumerate()
            .all(|(i, w)| self.words.get(i).copied().unwrap_or(0) & w == *w)
    }

    /// Check whether the two sets share any id.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.words.iter().zip(&other.words).any(|(a, b)| a & b != 0)
    }

    /// Iterate over the ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = FeatureId> + '_ {
        self.words.iter().enumerate().flat_map(|(word_index, word)| {
            let mut bits = *word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let bit = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                u32::try_from(word_index * WORD_BITS + bit)
                    .ok()
                    .map(FeatureId::new)
            })
        })
    }
}
