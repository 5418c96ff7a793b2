//! # recdex
//!
//! Random access over a flat file of fixed-schema records, with two
//! lookup paths:
//! - Equality scan over a presorted column (three-way partition search)
//! - Disk-backed extendible hash index with decimal prefix queries
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Console (recdex)                        │
//! │                  one query per stdin token                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Database                              │
//! │                 (routes Query variants)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐     ┌────────────┐
//!   │ SortedKey   │          │ Extendible   │────▶│ HashBucket │
//!   │ Scanner     │          │ HashIndex    │     │ File       │
//!   └──────┬──────┘          └──────┬───────┘     └────────────┘
//!          │                        │ row numbers
//!          └────────────┬───────────┘
//!                       ▼
//!               ┌──────────────┐
//!               │ RecordStore  │
//!               │ (fixed rows) │
//!               └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod scan;
pub mod index;
pub mod query;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RecdexError, Result};
pub use config::{Config, IndexConfig};
pub use engine::Database;
pub use query::{Query, QueryKind};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of recdex
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
