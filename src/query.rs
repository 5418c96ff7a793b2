//! Query definitions
//!
//! Represents one console query line.

use chrono::NaiveDate;

use crate::error::{RecdexError, Result};
use crate::scan::DateKey;

/// Lookup paths a query can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Hash index prefix lookup
    Prefix,

    /// Sorted scan over the date column
    Date,
}

/// A parsed query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Rows whose index key starts with these digits
    Prefix(String),

    /// Rows whose sort column holds this date
    Date(NaiveDate),
}

impl Query {
    /// Parse a line for the given lookup path
    pub fn parse(kind: QueryKind, line: &str, date_key: &DateKey) -> Result<Self> {
        match kind {
            QueryKind::Prefix => Self::parse_prefix(line),
            QueryKind::Date => Self::parse_date(line, date_key),
        }
    }

    /// Digit prefix; length is checked against the index when executed
    pub fn parse_prefix(line: &str) -> Result<Self> {
        let prefix = line.trim();
        if !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RecdexError::InvalidQuery(format!(
                "{:?} is not a digit sequence",
                prefix
            )));
        }
        Ok(Query::Prefix(prefix.to_string()))
    }

    pub fn parse_date(line: &str, date_key: &DateKey) -> Result<Self> {
        date_key.parse(line).map(Query::Date).map_err(|e| {
            RecdexError::InvalidQuery(format!(
                "{:?} is not a date in format {}: {}",
                line.trim(),
                date_key.format(),
                e
            ))
        })
    }

    pub fn kind(&self) -> QueryKind {
        match self {
            Query::Prefix(_) => QueryKind::Prefix,
            Query::Date(_) => QueryKind::Date,
        }
    }
}
