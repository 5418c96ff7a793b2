//! Sort key decoders
//!
//! Turn the stored value of the sort column into an ordered key.

use chrono::NaiveDate;

use crate::error::{RecdexError, Result};
use crate::store::Value;

/// Decodes a stored cell into a key the column is sorted by
pub trait SortKey {
    type Key: Ord + std::fmt::Debug;

    /// Decode one cell; a cell that cannot be decoded is CorruptData
    fn decode(&self, value: &Value) -> Result<Self::Key>;
}

/// Integer column, compared numerically
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerKey;

impl SortKey for IntegerKey {
    type Key = i32;

    fn decode(&self, value: &Value) -> Result<i32> {
        value.as_integer().ok_or_else(|| {
            RecdexError::CorruptData(format!("expected an integer sort key, found {:?}", value))
        })
    }
}

/// Fixed-width text column holding formatted dates
#[derive(Debug, Clone)]
pub struct DateKey {
    format: String,
}

impl DateKey {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Parse a date in this key's format
    ///
    /// Surrounding whitespace is ignored, so stored padding never reaches
    /// the parser.
    pub fn parse(&self, text: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(text.trim(), &self.format)
    }
}

impl SortKey for DateKey {
    type Key = NaiveDate;

    fn decode(&self, value: &Value) -> Result<NaiveDate> {
        let text = value.as_text().ok_or_else(|| {
            RecdexError::CorruptData(format!("expected a date sort key, found {:?}", value))
        })?;

        self.parse(text).map_err(|e| {
            RecdexError::CorruptData(format!("unparsable date {:?}: {}", text.trim_end(), e))
        })
    }
}
