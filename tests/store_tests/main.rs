//! Record store tests

#[path = "../common/mod.rs"]
mod common;
