//! Tests for ExtendibleHashIndex
//!
//! These tests verify:
//! - Directory growth and in-place bucket splits
//! - The slot/bucket sharing invariant after many inserts
//! - Prefix queries at, below, and above the global depth
//! - IndexFull once every key digit is used up
//! - Index build over a record store

use std::collections::HashSet;
use std::path::PathBuf;

use recdex::index::ExtendibleHashIndex;
use recdex::store::{RecordStore, Value};
use recdex::{IndexConfig, RecdexError};
use tempfile::TempDir;

use crate::common::{keyed_store, lcg_keys};

// =============================================================================
// Helper Functions
// =============================================================================

fn config(capacity: u32) -> IndexConfig {
    IndexConfig {
        key_digits: 6,
        bucket_capacity: capacity,
    }
}

fn setup_index(capacity: u32) -> (TempDir, ExtendibleHashIndex) {
    let temp = TempDir::new().unwrap();
    let index =
        ExtendibleHashIndex::new(&temp.path().join("buckets.bin"), config(capacity)).unwrap();
    (temp, index)
}

fn bucket_path(temp: &TempDir) -> PathBuf {
    temp.path().join("buckets.bin")
}

/// Index with keys 1..=300, row = key - 1
fn setup_sequential_index() -> (TempDir, ExtendibleHashIndex) {
    let (temp, mut index) = setup_index(250);
    for key in 1..=300 {
        index.insert(key, key as u32 - 1).unwrap();
    }
    (temp, index)
}

fn sorted(mut rows: Vec<u32>) -> Vec<u32> {
    rows.sort_unstable();
    rows
}

// =============================================================================
// Split Tests
// =============================================================================

#[test]
fn test_new_index_is_depth_one() {
    let (_temp, index) = setup_index(250);

    assert_eq!(index.global_depth(), 1);
    assert_eq!(index.directory_len(), 10);
    assert_eq!(index.bucket_count(), 0);
    assert!(index.query("").unwrap().is_empty());
}

#[test]
fn test_overflow_grows_directory() {
    let (_temp, index) = setup_sequential_index();

    // 000001..000300 share leading digits until the fourth
    assert_eq!(index.global_depth(), 4);
    assert_eq!(index.directory_len(), 10_000);
    assert_eq!(index.entry_count(), 300);
    assert!(index.bucket_count() > 1);
}

#[test]
fn test_shared_bucket_splits_in_place() {
    let (_temp, mut index) = setup_index(2);

    index.insert(1, 0).unwrap(); // slot 0
    index.insert(100_000, 1).unwrap(); // slot 1
    index.insert(110_000, 2).unwrap(); // slot 1, now full
    index.insert(120_000, 3).unwrap(); // grows to depth 2

    assert_eq!(index.global_depth(), 2);
    let shared = index.bucket_at(0).unwrap();
    assert_eq!(index.slots_for(shared), (0..10).collect::<Vec<_>>());
    assert_eq!(index.bucket(shared).unwrap().depth, 1);

    index.insert(10_000, 4).unwrap(); // slot 01, shared bucket now full
    index.insert(20_000, 5).unwrap(); // splits without growing

    assert_eq!(index.global_depth(), 2);
    for slot in 0..3 {
        let id = index.bucket_at(slot).unwrap();
        assert_eq!(index.slots_for(id), vec![slot]);
        assert_eq!(index.bucket(id).unwrap().depth, 2);
    }
    assert!((3..10).all(|slot| index.bucket_at(slot).is_none()));
    assert_eq!(sorted(index.query("0").unwrap()), vec![0, 4, 5]);
    assert_eq!(sorted(index.query("").unwrap()), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_directory_invariant_after_random_inserts() {
    let (_temp, mut index) = setup_index(16);
    let keys = lcg_keys(3000, 1_000_000, 7);
    for (row, &key) in keys.iter().enumerate() {
        index.insert(key, row as u32).unwrap();
    }

    let global = index.global_depth();
    let mut covered = 0;
    for id in index.live_buckets() {
        let bucket = index.bucket(id).unwrap();
        let slots = index.slots_for(id);

        // 10^(global - local) contiguous slots sharing a local-depth prefix
        let span = 10usize.pow(global - bucket.depth);
        assert!(bucket.depth <= global);
        assert!(bucket.len() <= 16);
        assert_eq!(slots.len(), span);
        assert_eq!(slots[0] % span, 0);
        assert!(slots.windows(2).all(|w| w[1] == w[0] + 1));
        covered += slots.len();

        for entry in &bucket.entries {
            let slot = entry.key as usize / 10usize.pow(6 - global);
            assert!(slots.contains(&slot), "key {} misplaced", entry.key);
        }
    }
    assert!(covered <= index.directory_len());

    let all = sorted(index.query("").unwrap());
    assert_eq!(all, (0..3000).collect::<Vec<u32>>());
}

// =============================================================================
// Query Tests
// =============================================================================

#[test]
fn test_prefix_query_filters_by_padded_key() {
    let (_temp, index) = setup_sequential_index();

    let rows = sorted(index.query("0001").unwrap());

    // keys 100..=199 live in rows 99..=198
    assert_eq!(rows, (99..199).collect::<Vec<u32>>());
}

#[test]
fn test_empty_prefix_returns_every_row_once() {
    let (_temp, index) = setup_sequential_index();

    let rows = index.query("").unwrap();

    assert_eq!(rows.len(), 300);
    assert_eq!(rows.iter().collect::<HashSet<_>>().len(), 300);
}

#[test]
fn test_short_prefixes_below_global_depth() {
    let (_temp, index) = setup_sequential_index();

    assert_eq!(index.query("0").unwrap().len(), 300);
    assert_eq!(index.query("000").unwrap().len(), 300);
    assert_eq!(index.query("00").unwrap().len(), 300);
    assert!(index.query("1").unwrap().is_empty());
    assert!(index.query("9").unwrap().is_empty());
}

#[test]
fn test_full_length_prefix_addresses_one_key() {
    let (_temp, index) = setup_sequential_index();

    assert_eq!(index.query("000150").unwrap(), vec![149]);
    assert!(index.query("000301").unwrap().is_empty());
    assert!(index.query("999999").unwrap().is_empty());
}

#[test]
fn test_prefix_longer_than_depth_filters_within_bucket() {
    let (_temp, index) = setup_sequential_index();

    assert_eq!(sorted(index.query("00025").unwrap()), (249..259).collect::<Vec<u32>>());
}

#[test]
fn test_repeated_queries_are_stable() {
    let (_temp, mut index) = setup_index(8);
    for (row, key) in lcg_keys(500, 1_000_000, 3).into_iter().enumerate() {
        index.insert(key, row as u32).unwrap();
    }

    for prefix in ["", "1", "42", "500", "0000", "98765"] {
        let first = sorted(index.query(prefix).unwrap());
        let second = sorted(index.query(prefix).unwrap());
        assert_eq!(first, second, "prefix {:?}", prefix);
    }
}

#[test]
fn test_duplicate_keys_are_all_reported() {
    let (_temp, mut index) = setup_index(8);
    for row in 0..10 {
        index.insert(555_000 + row as i32 % 2, row).unwrap();
    }

    assert_eq!(index.query("555000").unwrap().len(), 5);
    assert_eq!(index.query("555001").unwrap().len(), 5);
    assert_eq!(index.query("5550").unwrap().len(), 10);
}

#[test]
fn test_invalid_prefix_is_rejected_without_side_effects() {
    let (_temp, index) = setup_sequential_index();

    assert!(matches!(index.query("12a"), Err(RecdexError::InvalidQuery(_))));
    assert!(matches!(index.query("-1"), Err(RecdexError::InvalidQuery(_))));
    assert!(matches!(index.query("1234567"), Err(RecdexError::InvalidQuery(_))));

    assert_eq!(index.query("").unwrap().len(), 300);
}

// =============================================================================
// Key Domain / IndexFull Tests
// =============================================================================

#[test]
fn test_key_out_of_domain() {
    let (_temp, mut index) = setup_index(4);

    assert!(matches!(
        index.insert(-5, 0),
        Err(RecdexError::KeyOutOfDomain { key: -5, digits: 6 })
    ));
    assert!(matches!(
        index.insert(1_000_000, 0),
        Err(RecdexError::KeyOutOfDomain { .. })
    ));
    assert!(index.insert(999_999, 0).is_ok());
}

#[test]
fn test_index_full_when_digits_exhausted() {
    let (_temp, mut index) = setup_index(250);
    for row in 0..250 {
        index.insert(123_456, row).unwrap();
    }

    let result = index.insert(123_456, 250);

    assert!(matches!(
        result,
        Err(RecdexError::IndexFull { key: 123_456, depth: 6 })
    ));
    assert_eq!(index.global_depth(), 6);
    assert_eq!(index.entry_count(), 250);
    assert_eq!(sorted(index.query("123456").unwrap()), (0..250).collect::<Vec<u32>>());
}

// =============================================================================
// Build Tests
// =============================================================================

#[test]
fn test_build_skips_unparsable_keys() {
    let temp = TempDir::new().unwrap();
    let path = keyed_store(temp.path(), &[100, -1, 200, 5_000_000, 300]);
    let store = RecordStore::open(&path).unwrap();

    let index = ExtendibleHashIndex::build(&store, 0, &bucket_path(&temp), config(250)).unwrap();

    assert_eq!(index.entry_count(), 3);
    assert_eq!(sorted(index.query("").unwrap()), vec![0, 2, 4]);
}

#[test]
fn test_build_skips_text_key_column() {
    let temp = TempDir::new().unwrap();
    let path = keyed_store(temp.path(), &[1, 2, 3]);
    let store = RecordStore::open(&path).unwrap();

    let index = ExtendibleHashIndex::build(&store, 1, &bucket_path(&temp), config(250)).unwrap();

    assert_eq!(index.entry_count(), 0);
}

#[test]
fn test_build_rejects_missing_field() {
    let temp = TempDir::new().unwrap();
    let path = keyed_store(temp.path(), &[1]);
    let store = RecordStore::open(&path).unwrap();

    let result = ExtendibleHashIndex::build(&store, 5, &bucket_path(&temp), config(250));

    assert!(matches!(result, Err(RecdexError::Config(_))));
}

#[test]
fn test_query_rows_resolve_through_store() {
    let temp = TempDir::new().unwrap();
    let keys: Vec<i32> = (1..=300).collect();
    let path = keyed_store(temp.path(), &keys);
    let store = RecordStore::open(&path).unwrap();
    let index = ExtendibleHashIndex::build(&store, 0, &bucket_path(&temp), config(250)).unwrap();

    let rows = index.query_rows("0001", &store).unwrap();

    assert_eq!(rows.len(), 100);
    for row in rows {
        let key = row.get(0).and_then(Value::as_integer).unwrap();
        assert!(format!("{:06}", key).starts_with("0001"));
        assert_eq!(row.number() as i32, key - 1);
    }
}

#[test]
fn test_build_index_full_leaves_store_intact() {
    let temp = TempDir::new().unwrap();
    let path = keyed_store(temp.path(), &[42; 251]);
    let store = RecordStore::open(&path).unwrap();

    let result = ExtendibleHashIndex::build(&store, 0, &bucket_path(&temp), config(250));

    assert!(matches!(result, Err(RecdexError::IndexFull { key: 42, .. })));
    assert_eq!(store.row_count(), 251);
    assert_eq!(store.get(250).unwrap().get(0), Some(&Value::Integer(42)));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp = TempDir::new().unwrap();

    let zero_capacity = ExtendibleHashIndex::new(&bucket_path(&temp), config(0));
    let too_wide = ExtendibleHashIndex::new(
        &bucket_path(&temp),
        IndexConfig {
            key_digits: 10,
            bucket_capacity: 4,
        },
    );

    assert!(matches!(zero_capacity, Err(RecdexError::Config(_))));
    assert!(matches!(too_wide, Err(RecdexError::Config(_))));
}
