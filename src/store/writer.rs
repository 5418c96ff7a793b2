//! Record Store Writer
//!
//! Writes rows in the fixed-record layout. This is the output side of
//! ingestion: callers are responsible for the row order the scan relies on.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use bytes::{BufMut, BytesMut};

use crate::error::{RecdexError, Result};

use super::{
    FieldKind, Schema, Value, DESCRIPTOR_SIZE, HEADER_PREFIX_SIZE, PAD_BYTE, ROW_COUNT_OFFSET,
};

/// Builder for creating a new record store file
pub struct StoreWriter {
    /// Output file path
    path: PathBuf,
    /// Buffered writer for performance
    writer: BufWriter<File>,
    /// Column layout every row is checked against
    schema: Schema,
    /// Number of rows written
    row_count: u32,
    /// Scratch buffer reused per row
    row_buf: BytesMut,
}

impl StoreWriter {
    /// Create a new store file
    ///
    /// Writes the header immediately with a zero row count; call `append()`
    /// per row, then `finish()` to patch the count.
    pub fn create(path: &Path, schema: Schema) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut writer = BufWriter::new(file);

        let mut header =
            BytesMut::with_capacity(HEADER_PREFIX_SIZE + schema.len() * DESCRIPTOR_SIZE);
        header.put_i32(schema.len() as i32);
        header.put_i32(0); // Placeholder for row count
        for field in schema.fields() {
            field.encode(&mut header);
        }
        writer.write_all(&header)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer,
            row_buf: BytesMut::with_capacity(schema.stride() as usize),
            schema,
            row_count: 0,
        })
    }

    /// Append a row; strings are right-padded with spaces to their width
    pub fn append(&mut self, values: &[Value]) -> Result<u32> {
        if values.len() != self.schema.len() {
            return Err(RecdexError::SchemaMismatch(format!(
                "expected {} values, got {}",
                self.schema.len(),
                values.len()
            )));
        }

        self.row_buf.clear();
        for (i, (field, value)) in self.schema.fields().iter().zip(values).enumerate() {
            match (field.kind, value) {
                (FieldKind::Integer, Value::Integer(v)) => self.row_buf.put_i32(*v),
                (FieldKind::FixedString(width), Value::Text(s)) => {
                    let bytes = s.as_bytes();
                    if bytes.len() > width as usize {
                        return Err(RecdexError::SchemaMismatch(format!(
                            "field {} is {} bytes wide, value has {}",
                            i,
                            width,
                            bytes.len()
                        )));
                    }
                    self.row_buf.put_slice(bytes);
                    self.row_buf.put_bytes(PAD_BYTE, width as usize - bytes.len());
                }
                (kind, value) => {
                    return Err(RecdexError::SchemaMismatch(format!(
                        "field {} is {:?}, got {:?}",
                        i, kind, value
                    )));
                }
            }
        }

        self.writer.write_all(&self.row_buf)?;
        let row = self.row_count;
        self.row_count += 1;
        Ok(row)
    }

    /// Number of rows appended so far
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Finish writing: patch the row count and sync
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;

        let mut file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.seek(SeekFrom::Start(ROW_COUNT_OFFSET))?;
        file.write_all(&(self.row_count as i32).to_be_bytes())?;
        file.sync_all()?;

        tracing::debug!("Wrote {} rows to {}", self.row_count, self.path.display());

        Ok(self.path)
    }
}
