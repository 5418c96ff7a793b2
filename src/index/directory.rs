//! Extendible hash directory
//!
//! Array of optional bucket handles indexed by the leading `depth` digits
//! of a key. Length is always 10^depth.

use std::ops::Range;

use super::bucket::BucketId;

/// Number of distinct values of one key digit
pub const KEY_CARDINALITY: usize = 10;

/// 10^exp as usize
pub(crate) fn pow10(exp: u32) -> usize {
    KEY_CARDINALITY.pow(exp)
}

/// Directory of bucket handles
///
/// A bucket of local depth `d` is referenced by the 10^(depth − d)
/// contiguous slots sharing its d-digit prefix. `None` marks a slot with no
/// bucket yet.
#[derive(Debug, Clone)]
pub struct Directory {
    depth: u32,
    slots: Vec<Option<BucketId>>,
}

impl Directory {
    /// Directory at depth 1: one empty slot per leading digit
    pub fn new() -> Self {
        Self {
            depth: 1,
            slots: vec![None; KEY_CARDINALITY],
        }
    }

    /// Global depth
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<BucketId> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn set(&mut self, slot: usize, bucket: BucketId) {
        self.slots[slot] = Some(bucket);
    }

    /// Slot referenced by a key of `key_digits` digits at the current depth
    pub fn slot_for(&self, key: i32, key_digits: u32) -> usize {
        key as usize / pow10(key_digits - self.depth)
    }

    /// Grow one level: every slot is refined into ten child slots pointing
    /// at the same bucket, except the children of `vacated`, which are
    /// left empty.
    pub fn grow(&mut self, vacated: usize) {
        let mut slots = vec![None; self.slots.len() * KEY_CARDINALITY];
        for (i, bucket) in self.slots.iter().enumerate() {
            if i == vacated {
                continue;
            }
            let children = i * KEY_CARDINALITY..(i + 1) * KEY_CARDINALITY;
            slots[children].fill(*bucket);
        }

        self.slots = slots;
        self.depth += 1;
    }

    /// Empty every slot in `range`
    pub fn clear(&mut self, range: Range<usize>) {
        self.slots[range].fill(None);
    }

    /// Slots whose index starts with the digits of `prefix`, a prefix of
    /// `len` digits with value `prefix`, where `len <= depth`
    pub fn range_for_prefix(&self, prefix: usize, len: u32) -> Range<usize> {
        let scale = pow10(self.depth - len);
        prefix * scale..(prefix + 1) * scale
    }

    /// Slots referring to `bucket`
    pub fn slots_of(&self, bucket: BucketId) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| **slot == Some(bucket))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<BucketId>> + '_ {
        self.slots.iter().copied()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}
