//! Record Store Module
//!
//! Flat collection of fixed-schema rows in a compact binary layout, with
//! O(1) random access by row number.
//!
//! ## File Format (all integers big-endian)
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header                                                  │
//! │   FieldCount: i32 (4) | RowCount: i32 (4)               │
//! │   per field: IsString: u8 (1) | MaxWidth: i32 (4)       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Data Block (RowCount × stride bytes)                    │
//! │   per row, per field:                                   │
//! │     string  → MaxWidth bytes, space-padded              │
//! │     integer → i32 (4)   (unparsable cells are -1)       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! `stride` is the sum of field widths, so row `i` lives at
//! `data_start + i × stride`.

mod reader;
mod schema;
mod value;
mod writer;

pub use reader::RecordStore;
pub use schema::{FieldDescriptor, FieldKind, Schema};
pub use value::{Row, Value};
pub use writer::StoreWriter;

// =============================================================================
// Shared Constants (used by reader and writer)
// =============================================================================

/// Size of the fixed header prefix: FieldCount (4) + RowCount (4)
pub(crate) const HEADER_PREFIX_SIZE: usize = 8;

/// Size of one field descriptor: IsString (1) + MaxWidth (4)
pub(crate) const DESCRIPTOR_SIZE: usize = 5;

/// Byte offset of the row count inside the header
pub(crate) const ROW_COUNT_OFFSET: u64 = 4;

/// Width of an integer field on disk
pub(crate) const INTEGER_WIDTH: u32 = 4;

/// Byte used to right-pad string fields
pub(crate) const PAD_BYTE: u8 = b' ';
