//! Hash Index Module
//!
//! Disk-backed extendible hashing over a fixed-width decimal key, with
//! prefix queries.
//!
//! ## Bucket File Format (integers big-endian)
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Slot 0                                                  │
//! │   EntryCount: i32 (4) | LocalDepth: i32 (4)             │
//! │   capacity × [Key: i32 (4) | RowNumber: i32 (4)]        │
//! │   (only the first EntryCount entries are meaningful)    │
//! ├─────────────────────────────────────────────────────────┤
//! │ Slot 1 ...                                              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Directory
//! ```text
//!   depth 2, key digits 6
//!   slot:   00  01 .. 09 | 10 .. 19 | 20 | 21 | ... | 99
//!   bucket:  A   A ..  A |  B ..  B |  C |  D | ... |  -
//!            └ depth 1 ┘   └ depth 1 ┘  └ depth 2 ┘
//! ```

mod bucket;
mod bucket_file;
mod directory;
mod hash_index;

pub use bucket::{Bucket, BucketEntry, BucketId, ENTRY_SIZE};
pub use bucket_file::{HashBucketFile, BUCKET_METADATA_SIZE};
pub use directory::{Directory, KEY_CARDINALITY};
pub use hash_index::ExtendibleHashIndex;
