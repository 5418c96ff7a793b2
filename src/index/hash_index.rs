//! Extendible Hash Index
//!
//! In-memory directory over disk-resident buckets, keyed by the leading
//! decimal digits of a fixed-width numeric key.

use std::collections::HashSet;
use std::path::Path;

use crate::config::IndexConfig;
use crate::error::{RecdexError, Result};
use crate::store::{RecordStore, Row, Value};

use super::bucket::{Bucket, BucketEntry, BucketId};
use super::bucket_file::HashBucketFile;
use super::directory::{pow10, Directory};

/// Secondary index resolving decimal prefixes to row numbers
///
/// ## Splitting
/// - A full bucket whose local depth equals the global depth forces the
///   directory to grow by a digit; the slots under the overflowing hash
///   start out empty and its entries are reinserted.
/// - A full bucket shared by several slots is split in place: its slot
///   range is cleared and its entries reinserted into fresh buckets.
///
/// The overflowing bucket's slot is abandoned in both cases.
pub struct ExtendibleHashIndex {
    config: IndexConfig,
    directory: Directory,
    buckets: HashBucketFile,
    /// Entries inserted, excluding reinsertions
    entry_count: u64,
}

impl ExtendibleHashIndex {
    /// Create an empty index backed by a new bucket file at `bucket_path`
    pub fn new(bucket_path: &Path, config: IndexConfig) -> Result<Self> {
        config.validate()?;
        let buckets = HashBucketFile::create(bucket_path, config.bucket_capacity)?;

        Ok(Self {
            config,
            directory: Directory::new(),
            buckets,
            entry_count: 0,
        })
    }

    /// Build an index over `key_field` of every row, in row-number order
    ///
    /// Rows whose key is not an integer, is -1, or does not fit the key
    /// width are left out of the index.
    pub fn build(
        store: &RecordStore,
        key_field: usize,
        bucket_path: &Path,
        config: IndexConfig,
    ) -> Result<Self> {
        if store.schema().field(key_field).is_none() {
            return Err(RecdexError::Config(format!(
                "index field {} is beyond the {}-field schema",
                key_field,
                store.schema().len()
            )));
        }

        let mut index = Self::new(bucket_path, config)?;
        let mut skipped: u64 = 0;

        for row in 0..store.row_count() {
            let record = store.get(row)?;
            let key = match record.get(key_field) {
                Some(Value::Integer(key)) if *key != -1 => *key,
                _ => {
                    skipped += 1;
                    continue;
                }
            };

            if !index.in_domain(key) {
                tracing::warn!(
                    "Row {} key {} does not fit {} digits, not indexed",
                    row,
                    key,
                    config.key_digits
                );
                skipped += 1;
                continue;
            }

            index.insert(key, row)?;
        }

        tracing::info!(
            "Built hash index over field {}: {} entries, {} rows skipped, depth {}, {} bucket slots",
            key_field,
            index.entry_count,
            skipped,
            index.global_depth(),
            index.bucket_count()
        );

        Ok(index)
    }

    /// Insert one (key, row) pair
    pub fn insert(&mut self, key: i32, row: u32) -> Result<()> {
        if !self.in_domain(key) {
            return Err(RecdexError::KeyOutOfDomain {
                key,
                digits: self.config.key_digits,
            });
        }

        self.insert_entry(BucketEntry::new(key, row))?;
        self.entry_count += 1;
        Ok(())
    }

    fn insert_entry(&mut self, entry: BucketEntry) -> Result<()> {
        let hash = self.directory.slot_for(entry.key, self.config.key_digits);

        // Step 1: First entry for this slot gets a fresh bucket
        let id = match self.directory.get(hash) {
            Some(id) => id,
            None => {
                let id = self.buckets.create_bucket(self.directory.depth())?;
                self.directory.set(hash, id);
                id
            }
        };

        // Step 2: Try the bucket
        if self.buckets.append(id, entry)? {
            return Ok(());
        }

        // Step 3: Overflow, split and retry
        let bucket = self.buckets.read(id)?;
        let global = self.directory.depth();

        if bucket.depth == global {
            if global == self.config.key_digits {
                return Err(RecdexError::IndexFull {
                    key: entry.key,
                    depth: global,
                });
            }

            self.directory.grow(hash);
            tracing::debug!(
                "Directory grew to depth {} ({} slots) splitting bucket {}",
                self.directory.depth(),
                self.directory.len(),
                id
            );
        } else {
            let old_hash = entry.key as usize / pow10(self.config.key_digits - bucket.depth);
            let shared = self.directory.range_for_prefix(old_hash, bucket.depth);
            tracing::debug!(
                "Splitting bucket {} at depth {} across slots {:?}",
                id,
                bucket.depth,
                shared
            );
            self.directory.clear(shared);
        }

        self.reinsert(bucket)?;
        self.insert_entry(entry)
    }

    /// Place every entry of an abandoned bucket again
    fn reinsert(&mut self, bucket: Bucket) -> Result<()> {
        for entry in bucket.entries {
            self.insert_entry(entry)?;
        }
        Ok(())
    }

    /// Row numbers whose zero-padded key starts with `prefix`
    ///
    /// Each row appears once; order follows the bucket scan.
    pub fn query(&self, prefix: &str) -> Result<Vec<u32>> {
        self.validate_prefix(prefix)?;

        let len = prefix.len() as u32;
        let global = self.directory.depth();
        let mut found = Vec::new();

        if len >= global {
            // Exactly one slot can hold matches
            let hash = parse_digits(&prefix[..global as usize]);
            if let Some(id) = self.directory.get(hash) {
                self.collect_matches(id, prefix, &mut found)?;
            }
        } else {
            // Prefix spans a contiguous slot range; visit each bucket once
            let slots = self.directory.range_for_prefix(parse_digits(prefix), len);
            let mut visited = HashSet::new();
            for slot in slots {
                if let Some(id) = self.directory.get(slot) {
                    if visited.insert(id) {
                        self.collect_matches(id, prefix, &mut found)?;
                    }
                }
            }
        }

        tracing::trace!("Prefix query {:?} matched {} rows", prefix, found.len());
        Ok(found)
    }

    /// Matching rows materialized from `store`
    pub fn query_rows(&self, prefix: &str, store: &RecordStore) -> Result<Vec<Row>> {
        self.query(prefix)?
            .into_iter()
            .map(|row| store.get(row))
            .collect()
    }

    fn collect_matches(&self, id: BucketId, prefix: &str, found: &mut Vec<u32>) -> Result<()> {
        let width = self.config.key_digits as usize;
        let bucket = self.buckets.read(id)?;
        found.extend(
            bucket
                .entries
                .into_iter()
                .filter(|e| format!("{:0width$}", e.key, width = width).starts_with(prefix))
                .map(|e| e.row),
        );
        Ok(())
    }

    fn validate_prefix(&self, prefix: &str) -> Result<()> {
        if prefix.len() > self.config.key_digits as usize {
            return Err(RecdexError::InvalidQuery(format!(
                "prefix {:?} is longer than {} digits",
                prefix, self.config.key_digits
            )));
        }
        if !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RecdexError::InvalidQuery(format!(
                "prefix {:?} must be a digit sequence",
                prefix
            )));
        }
        Ok(())
    }

    fn in_domain(&self, key: i32) -> bool {
        key >= 0 && (key as usize) < pow10(self.config.key_digits)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    pub fn global_depth(&self) -> u32 {
        self.directory.depth()
    }

    /// Entries inserted
    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }

    pub fn directory_len(&self) -> usize {
        self.directory.len()
    }

    /// Allocated bucket slots, including ones abandoned by splits
    pub fn bucket_count(&self) -> u32 {
        self.buckets.slot_count()
    }

    /// Bucket referenced by a directory slot
    pub fn bucket_at(&self, slot: usize) -> Option<BucketId> {
        self.directory.get(slot)
    }

    /// Directory slots referencing `bucket`
    pub fn slots_for(&self, bucket: BucketId) -> Vec<usize> {
        self.directory.slots_of(bucket)
    }

    /// Distinct buckets currently referenced by the directory
    pub fn live_buckets(&self) -> Vec<BucketId> {
        let mut seen = HashSet::new();
        self.directory
            .iter()
            .flatten()
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Read a bucket's contents
    pub fn bucket(&self, id: BucketId) -> Result<Bucket> {
        self.buckets.read(id)
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }
}

/// Value of an ASCII digit string already validated by the caller
fn parse_digits(digits: &str) -> usize {
    digits
        .bytes()
        .fold(0, |acc, b| acc * 10 + (b - b'0') as usize)
}
