//! Database and query surface tests

#[path = "../common/mod.rs"]
mod common;

mod query_tests;
