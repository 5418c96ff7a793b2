//! Error types for recdex
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using RecdexError
pub type Result<T> = std::result::Result<T, RecdexError>;

/// Unified error type for recdex operations
#[derive(Debug, Error)]
pub enum RecdexError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage exhausted: {0}")]
    StorageExhausted(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // Persisted Format Errors
    // -------------------------------------------------------------------------
    #[error("Corrupt store header: {0}")]
    CorruptHeader(String),

    #[error("Corrupt data: {0}")]
    CorruptData(String),

    #[error("Row does not match schema: {0}")]
    SchemaMismatch(String),

    // -------------------------------------------------------------------------
    // Bounds Errors
    // -------------------------------------------------------------------------
    #[error("Row {row} out of range (row count {row_count})")]
    RowOutOfRange { row: u32, row_count: u32 },

    #[error("Bucket slot {slot} out of range ({slot_count} allocated)")]
    SlotOutOfRange { slot: u32, slot_count: u32 },

    // -------------------------------------------------------------------------
    // Index Errors
    // -------------------------------------------------------------------------
    #[error("Index full: key {key:06} cannot be placed, bucket is full at depth {depth}")]
    IndexFull { key: i32, depth: u32 },

    #[error("Key {key} is outside the {digits}-digit key domain")]
    KeyOutOfDomain { key: i32, digits: u32 },

    // -------------------------------------------------------------------------
    // Query Errors
    // -------------------------------------------------------------------------
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RecdexError {
    /// Whether the console may report this error and keep serving queries.
    ///
    /// Everything except a malformed query leaves the store or index in a
    /// state the session cannot trust.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RecdexError::InvalidQuery(_))
    }
}
