//! Shared fixtures for the integration test binaries

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use recdex::store::{FieldDescriptor, Schema, StoreWriter, Value};

/// Write a store with the given schema and rows
pub fn write_store(dir: &Path, name: &str, schema: Schema, rows: &[Vec<Value>]) -> PathBuf {
    let path = dir.join(name);
    let mut writer = StoreWriter::create(&path, schema).unwrap();
    for row in rows {
        writer.append(row).unwrap();
    }
    writer.finish().unwrap()
}

/// Schema of `keyed_store`: [Integer key, FixedString(8) label]
pub fn keyed_schema() -> Schema {
    Schema::new(vec![FieldDescriptor::integer(), FieldDescriptor::fixed_string(8)])
}

/// Store whose row `i` holds `keys[i]` and label `row{i}`
pub fn keyed_store(dir: &Path, keys: &[i32]) -> PathBuf {
    let rows: Vec<Vec<Value>> = keys
        .iter()
        .enumerate()
        .map(|(i, &k)| vec![Value::Integer(k), Value::Text(format!("row{}", i))])
        .collect();
    write_store(dir, "keyed.bin", keyed_schema(), &rows)
}

/// Schema of a case store: [id, decision date, case name, issue]
pub fn case_schema() -> Schema {
    Schema::new(vec![
        FieldDescriptor::integer(),
        FieldDescriptor::fixed_string(10),
        FieldDescriptor::fixed_string(12),
        FieldDescriptor::integer(),
    ])
}

/// One row of a case store
pub fn case_row(id: i32, date: &str, name: &str, issue: i32) -> Vec<Value> {
    vec![
        Value::Integer(id),
        Value::from(date),
        Value::from(name),
        Value::Integer(issue),
    ]
}

/// Deterministic pseudo-random keys below `bound`
pub fn lcg_keys(count: usize, bound: u32, seed: u32) -> Vec<i32> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            ((state >> 8) % bound) as i32
        })
        .collect()
}
