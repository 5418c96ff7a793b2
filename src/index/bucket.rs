//! Bucket definitions
//!
//! In-memory views of bucket slots read from the bucket file.

use std::fmt;

use bytes::{Buf, BufMut};

/// Size in bytes of one entry on disk: key (4) + row number (4)
pub const ENTRY_SIZE: u64 = 8;

/// Handle of a bucket slot in the bucket file
///
/// Directory slots hold these, so several slots can refer to one bucket
/// without sharing the bucket's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketId(pub u32);

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A (key, row number) pair; the row number refers back into the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketEntry {
    pub key: i32,
    pub row: u32,
}

impl BucketEntry {
    pub fn new(key: i32, row: u32) -> Self {
        Self { key, row }
    }

    pub(crate) fn encode(&self, buf: &mut impl BufMut) {
        buf.put_i32(self.key);
        buf.put_i32(self.row as i32);
    }

    pub(crate) fn decode(buf: &mut impl Buf) -> Self {
        let key = buf.get_i32();
        let row = buf.get_i32() as u32;
        Self { key, row }
    }
}

/// Contents of one bucket slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Number of leading key digits this bucket was created for
    pub depth: u32,
    /// Entries in insertion order
    pub entries: Vec<BucketEntry>,
}

impl Bucket {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
