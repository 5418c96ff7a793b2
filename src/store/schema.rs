//! Schema definitions
//!
//! Column layout of a record store, fixed when the store is created.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{RecdexError, Result};

use super::{DESCRIPTOR_SIZE, INTEGER_WIDTH};

/// Kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 4-byte big-endian signed integer
    Integer,

    /// Fixed-width byte sequence of the given width
    FixedString(u32),
}

/// Descriptor of a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn integer() -> Self {
        Self {
            kind: FieldKind::Integer,
        }
    }

    pub fn fixed_string(width: u32) -> Self {
        Self {
            kind: FieldKind::FixedString(width),
        }
    }

    /// Bytes this field occupies in every row
    pub fn width(&self) -> u32 {
        match self.kind {
            FieldKind::Integer => INTEGER_WIDTH,
            FieldKind::FixedString(width) => width,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self.kind, FieldKind::FixedString(_))
    }

    /// Encode as [IsString: u8][MaxWidth: i32]
    ///
    /// Integers carry a zero width.
    pub(crate) fn encode(&self, buf: &mut BytesMut) {
        match self.kind {
            FieldKind::Integer => {
                buf.put_u8(0);
                buf.put_i32(0);
            }
            FieldKind::FixedString(width) => {
                buf.put_u8(1);
                buf.put_i32(width as i32);
            }
        }
    }

    /// Decode one descriptor; `buf` must hold at least DESCRIPTOR_SIZE bytes
    pub(crate) fn decode(buf: &mut impl Buf, index: usize) -> Result<Self> {
        debug_assert!(buf.remaining() >= DESCRIPTOR_SIZE);

        let is_string = buf.get_u8() != 0;
        let width = buf.get_i32();

        if !is_string {
            return Ok(Self::integer());
        }
        if width < 0 {
            return Err(RecdexError::CorruptHeader(format!(
                "field {} has negative width {}",
                index, width
            )));
        }
        Ok(Self::fixed_string(width as u32))
    }
}

/// Ordered column layout of a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
    /// Sum of field widths
    stride: u64,
}

impl Schema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        let stride = fields
            .iter()
            .fold(0u64, |acc, field| acc.saturating_add(field.width() as u64));

        Self { fields, stride }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Bytes per row
    pub fn stride(&self) -> u64 {
        self.stride
    }
}
