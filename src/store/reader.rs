//! Record Store Reader
//!
//! Opens a store file and provides O(1) row lookups by row number.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use bytes::Buf;
use parking_lot::Mutex;

use crate::error::{RecdexError, Result};

use super::{FieldDescriptor, FieldKind, Row, Schema, Value, DESCRIPTOR_SIZE, HEADER_PREFIX_SIZE};

/// Random-access reader over a fixed-record store
///
/// The file handle sits behind a mutex so that the seek and the read of a
/// row happen together; `get` never relies on where a previous call left
/// the file position.
pub struct RecordStore {
    /// Path the store was opened from
    path: PathBuf,
    /// Buffered file handle, always repositioned before a read
    file: Mutex<BufReader<File>>,
    /// Column layout
    schema: Schema,
    /// Number of rows in the data block
    row_count: u32,
    /// Offset of row 0
    data_start: u64,
}

impl RecordStore {
    /// Open a store, reading and validating its header
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let mut file = BufReader::new(file);

        // Step 1: Fixed prefix
        let mut prefix = [0u8; HEADER_PREFIX_SIZE];
        read_header_bytes(&mut file, &mut prefix, "field and row counts")?;
        let mut prefix = &prefix[..];
        let field_count = prefix.get_i32();
        let row_count = prefix.get_i32();

        if field_count < 0 || row_count < 0 {
            return Err(RecdexError::CorruptHeader(format!(
                "negative counts: {} fields, {} rows",
                field_count, row_count
            )));
        }

        // Step 2: Field descriptors
        let header_len = HEADER_PREFIX_SIZE as u64 + field_count as u64 * DESCRIPTOR_SIZE as u64;
        if header_len > file_len {
            return Err(RecdexError::CorruptHeader(format!(
                "file ends before {} field descriptors",
                field_count
            )));
        }
        let mut descriptors = vec![0u8; field_count as usize * DESCRIPTOR_SIZE];
        read_header_bytes(&mut file, &mut descriptors, "field descriptors")?;
        let mut buf = &descriptors[..];
        let mut fields = Vec::with_capacity(field_count as usize);
        for i in 0..field_count as usize {
            fields.push(FieldDescriptor::decode(&mut buf, i)?);
        }

        let schema = Schema::new(fields);
        let data_start = (HEADER_PREFIX_SIZE + descriptors.len()) as u64;

        // Step 3: No partial rows
        let expected_len = (row_count as u64)
            .checked_mul(schema.stride())
            .and_then(|data_len| data_len.checked_add(data_start))
            .ok_or_else(|| {
                RecdexError::CorruptHeader(format!(
                    "{} rows of {} bytes overflow the file size",
                    row_count,
                    schema.stride()
                ))
            })?;
        if expected_len != file_len {
            return Err(RecdexError::CorruptHeader(format!(
                "{} rows of {} bytes need a {} byte file, found {} bytes",
                row_count,
                schema.stride(),
                expected_len,
                file_len
            )));
        }

        tracing::info!(
            "Opened record store {}: {} fields, {} rows, stride {} bytes",
            path.display(),
            schema.len(),
            row_count,
            schema.stride()
        );

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
            schema,
            row_count: row_count as u32,
            data_start,
        })
    }

    /// Read one row by row number with a single seek and read
    pub fn get(&self, row: u32) -> Result<Row> {
        if row >= self.row_count {
            return Err(RecdexError::RowOutOfRange {
                row,
                row_count: self.row_count,
            });
        }

        let offset = self.data_start + row as u64 * self.schema.stride();
        let mut bytes = vec![0u8; self.schema.stride() as usize];
        {
            let mut file = self.file.lock();
            file.seek(SeekFrom::Start(offset))?;
            file.read_exact(&mut bytes)?;
        }

        Ok(Row::new(row, self.decode_row(&bytes)))
    }

    /// Decode a row buffer of exactly `stride` bytes
    fn decode_row(&self, mut buf: &[u8]) -> Vec<Value> {
        self.schema
            .fields()
            .iter()
            .map(|field| match field.kind {
                FieldKind::Integer => Value::Integer(buf.get_i32()),
                FieldKind::FixedString(width) => {
                    let (text, rest) = buf.split_at(width as usize);
                    buf = rest;
                    Value::Text(String::from_utf8_lossy(text).into_owned())
                }
            })
            .collect()
    }

    /// Number of rows, O(1)
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Bytes per row
    pub fn stride(&self) -> u64 {
        self.schema.stride()
    }

    /// Offset of the first row
    pub fn data_start(&self) -> u64 {
        self.data_start
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Fill `buf` from the header, mapping a short read to CorruptHeader
fn read_header_bytes(file: &mut impl Read, buf: &mut [u8], what: &str) -> Result<()> {
    file.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => {
            RecdexError::CorruptHeader(format!("file ends before {}", what))
        }
        _ => RecdexError::Io(e),
    })
}
