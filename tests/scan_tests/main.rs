//! Sorted key scan tests

#[path = "../common/mod.rs"]
mod common;
