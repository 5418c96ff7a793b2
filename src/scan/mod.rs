//! Sorted Key Scan Module
//!
//! Equality lookup over a column that ingestion emitted in non-decreasing
//! order, using a recursive three-way partition of the row range.
//!
//! ## Partitioning
//! ```text
//!   lo            p1             p2             hi
//!   ├─────────────┼──────────────┼──────────────┤
//!   │    left     │P│   middle   │P│   right    │
//!   └─────────────┴─┴────────────┴─┴────────────┘
//!     t <= k(p1)     k(p1) <= t <= k(p2)   t >= k(p2)
//! ```
//!
//! The branch conditions include their boundaries, so a run of equal keys
//! straddling a pivot is explored on both sides. Sortedness is assumed,
//! never checked.

mod key;

pub use key::{DateKey, IntegerKey, SortKey};

use crate::error::{RecdexError, Result};
use crate::store::{RecordStore, Row};

/// Three-way partition search over one presorted column
pub struct SortedKeyScanner<'a, K: SortKey> {
    store: &'a RecordStore,
    field: usize,
    key: K,
}

impl<'a, K: SortKey> SortedKeyScanner<'a, K> {
    /// Create a scanner over `field` of `store`
    pub fn new(store: &'a RecordStore, field: usize, key: K) -> Result<Self> {
        if store.schema().field(field).is_none() {
            return Err(RecdexError::Config(format!(
                "sort field {} is beyond the {}-field schema",
                field,
                store.schema().len()
            )));
        }
        Ok(Self { store, field, key })
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    /// Row numbers whose key equals `target`, over the whole store
    ///
    /// Order is unspecified.
    pub fn query(&self, target: &K::Key) -> Result<Vec<u32>> {
        self.query_range(target, 0, self.store.row_count())
    }

    /// Row numbers in `[lo, hi)` whose key equals `target`
    pub fn query_range(&self, target: &K::Key, lo: u32, hi: u32) -> Result<Vec<u32>> {
        let mut found = Vec::new();
        self.search(target, lo, hi, &mut found)?;
        tracing::trace!(
            "Sorted scan for {:?} in [{}, {}) matched {} rows",
            target,
            lo,
            hi,
            found.len()
        );
        Ok(found)
    }

    /// Matching rows materialized from the store
    pub fn query_rows(&self, target: &K::Key) -> Result<Vec<Row>> {
        self.query(target)?
            .into_iter()
            .map(|row| self.store.get(row))
            .collect()
    }

    fn search(&self, target: &K::Key, lo: u32, hi: u32, found: &mut Vec<u32>) -> Result<()> {
        if hi <= lo {
            return Ok(());
        }

        // Step 1: Pivots at one and two thirds
        let span = hi - lo;
        let p1 = lo + span / 3;
        let p2 = lo + (2 * span as u64 / 3) as u32;

        // Step 2: Probe both pivots
        let k1 = self.key_at(p1)?;
        let k2 = self.key_at(p2)?;

        // Step 3: Emit matching pivots
        if k1 == *target {
            found.push(p1);
        }
        if k2 == *target && p2 != p1 {
            found.push(p2);
        }

        // Step 4: Recurse into every branch that may hold the target
        if *target <= k1 {
            self.search(target, lo, p1, found)?;
        }
        if *target >= k2 {
            self.search(target, p2 + 1, hi, found)?;
        }
        if k1 <= *target && *target <= k2 {
            self.search(target, p1 + 1, p2, found)?;
        }

        Ok(())
    }

    /// Decode the sort key of one row
    fn key_at(&self, row: u32) -> Result<K::Key> {
        let record = self.store.get(row)?;
        let value = record.get(self.field).ok_or_else(|| {
            RecdexError::CorruptData(format!("row {} has no field {}", row, self.field))
        })?;
        self.key.decode(value)
    }
}
