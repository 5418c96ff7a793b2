//! Hash Bucket File
//!
//! Append-only file of fixed-size bucket slots. Pure storage: it knows
//! nothing about keys or hashing.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use bytes::{Buf, BufMut, BytesMut};
use parking_lot::Mutex;

use crate::error::{RecdexError, Result};

use super::bucket::{Bucket, BucketEntry, BucketId, ENTRY_SIZE};

/// Slot metadata: entry count (4) + local depth (4)
pub const BUCKET_METADATA_SIZE: u64 = 8;

/// Slotted bucket storage
///
/// Slots are allocated in order and never freed; a slot abandoned by a
/// split stays in the file as dead space.
pub struct HashBucketFile {
    path: PathBuf,
    /// File handle, repositioned before every access
    file: Mutex<File>,
    /// Maximum entries per slot
    capacity: u32,
    /// Number of allocated slots
    slot_count: u32,
}

impl HashBucketFile {
    /// Create an empty bucket file, truncating any existing one
    pub fn create(path: &Path, capacity: u32) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
            capacity,
            slot_count: 0,
        })
    }

    /// Bytes per slot: metadata + capacity entries
    pub fn slot_size(&self) -> u64 {
        BUCKET_METADATA_SIZE + self.capacity as u64 * ENTRY_SIZE
    }

    /// Allocate the next slot with zero entries at `depth`
    pub fn create_bucket(&mut self, depth: u32) -> Result<BucketId> {
        let id = BucketId(self.slot_count);

        let mut slot = BytesMut::with_capacity(self.slot_size() as usize);
        slot.put_i32(0);
        slot.put_i32(depth as i32);
        slot.put_bytes(0, (self.capacity as u64 * ENTRY_SIZE) as usize);

        let start = self.slot_start(id);
        {
            let mut file = self.file.lock();
            file.seek(SeekFrom::Start(start))
                .and_then(|_| file.write_all(&slot))
                .map_err(RecdexError::StorageExhausted)?;
        }

        self.slot_count += 1;
        Ok(id)
    }

    /// Append an entry to a slot
    ///
    /// Returns `Ok(false)` when the slot is already at capacity.
    pub fn append(&mut self, id: BucketId, entry: BucketEntry) -> Result<bool> {
        self.check_slot(id)?;
        let start = self.slot_start(id);

        let mut file = self.file.lock();

        // Read entry count
        file.seek(SeekFrom::Start(start))?;
        let mut count_bytes = [0u8; 4];
        file.read_exact(&mut count_bytes)?;
        let count = self.decode_count(id, i32::from_be_bytes(count_bytes))?;

        if count == self.capacity {
            return Ok(false);
        }

        // Write entry after the existing ones
        let mut encoded = BytesMut::with_capacity(ENTRY_SIZE as usize);
        entry.encode(&mut encoded);
        file.seek(SeekFrom::Start(
            start + BUCKET_METADATA_SIZE + count as u64 * ENTRY_SIZE,
        ))?;
        file.write_all(&encoded)?;

        // Bump entry count
        file.seek(SeekFrom::Start(start))?;
        file.write_all(&(count as i32 + 1).to_be_bytes())?;

        Ok(true)
    }

    /// Read a slot's depth and entries in insertion order
    pub fn read(&self, id: BucketId) -> Result<Bucket> {
        self.check_slot(id)?;
        let start = self.slot_start(id);

        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(start))?;

        let mut meta = [0u8; BUCKET_METADATA_SIZE as usize];
        read_slot_bytes(&mut *file, &mut meta, id)?;
        let mut meta = &meta[..];
        let count = self.decode_count(id, meta.get_i32())?;
        let depth = meta.get_i32();
        if depth < 0 {
            return Err(RecdexError::CorruptData(format!(
                "bucket {} has negative depth {}",
                id, depth
            )));
        }

        let mut body = vec![0u8; count as usize * ENTRY_SIZE as usize];
        read_slot_bytes(&mut *file, &mut body, id)?;
        let mut body = &body[..];
        let entries = (0..count).map(|_| BucketEntry::decode(&mut body)).collect();

        Ok(Bucket {
            depth: depth as u32,
            entries,
        })
    }

    /// Number of allocated slots, live or abandoned
    pub fn slot_count(&self) -> u32 {
        self.slot_count
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn slot_start(&self, id: BucketId) -> u64 {
        id.0 as u64 * self.slot_size()
    }

    fn check_slot(&self, id: BucketId) -> Result<()> {
        if id.0 >= self.slot_count {
            return Err(RecdexError::SlotOutOfRange {
                slot: id.0,
                slot_count: self.slot_count,
            });
        }
        Ok(())
    }

    fn decode_count(&self, id: BucketId, count: i32) -> Result<u32> {
        if count < 0 || count as u32 > self.capacity {
            return Err(RecdexError::CorruptData(format!(
                "bucket {} holds {} entries, capacity is {}",
                id, count, self.capacity
            )));
        }
        Ok(count as u32)
    }
}

fn read_slot_bytes(file: &mut impl Read, buf: &mut [u8], id: BucketId) -> Result<()> {
    file.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => {
            RecdexError::CorruptData(format!("bucket file ends inside slot {}", id))
        }
        _ => RecdexError::Io(e),
    })
}
