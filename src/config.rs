//! Configuration for recdex
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{RecdexError, Result};

/// Main configuration for a recdex database
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the fixed-record binary store
    pub store_path: PathBuf,

    /// Directory holding index files
    /// Internal structure:
    ///   {data_dir}/
    ///     └── hash_bucket_file.bin   (extendible hash buckets)
    pub data_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Index Configuration
    // -------------------------------------------------------------------------
    /// Column carrying the numeric hash index key
    pub index_field: usize,

    /// Fixed number of decimal digits in an index key
    pub key_digits: u32,

    /// Maximum entries per bucket slot
    pub bucket_capacity: u32,

    // -------------------------------------------------------------------------
    // Scan Configuration
    // -------------------------------------------------------------------------
    /// Presorted column used by the date scan
    pub sort_field: usize,

    /// chrono format string of the dates held in `sort_field`
    pub date_format: String,

    // -------------------------------------------------------------------------
    // Console Configuration
    // -------------------------------------------------------------------------
    /// Columns printed for every result row
    pub print_fields: Vec<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("data.bin"),
            data_dir: PathBuf::from("."),
            index_field: 39,
            key_digits: 6,
            bucket_capacity: 250,
            sort_field: 4,
            date_format: "%m/%d/%Y".to_string(),
            print_fields: vec![0, 4, 14, 39],
        }
    }
}

impl Config {
    /// Name of the bucket file inside `data_dir`
    pub const BUCKET_FILENAME: &'static str = "hash_bucket_file.bin";

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the hash bucket file
    pub fn bucket_path(&self) -> PathBuf {
        self.data_dir.join(Self::BUCKET_FILENAME)
    }

    /// Index layout derived from this config
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            key_digits: self.key_digits,
            bucket_capacity: self.bucket_capacity,
        }
    }

    /// Reject settings no index can be built with
    pub fn validate(&self) -> Result<()> {
        self.index_config().validate()?;
        if self.date_format.is_empty() {
            return Err(RecdexError::Config("date format must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Shape of an extendible hash index: key width and bucket size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Fixed number of decimal digits in a key
    pub key_digits: u32,

    /// Maximum entries per bucket
    pub bucket_capacity: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            key_digits: 6,
            bucket_capacity: 250,
        }
    }
}

impl IndexConfig {
    /// Largest supported key width; 10^9 keys still fit an i32 domain
    pub const MAX_KEY_DIGITS: u32 = 9;

    pub fn validate(&self) -> Result<()> {
        if self.key_digits == 0 || self.key_digits > Self::MAX_KEY_DIGITS {
            return Err(RecdexError::Config(format!(
                "key digits must be in 1..={}, got {}",
                Self::MAX_KEY_DIGITS,
                self.key_digits
            )));
        }
        if self.bucket_capacity == 0 {
            return Err(RecdexError::Config("bucket capacity must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the record store path
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store_path = path.into();
        self
    }

    /// Set the directory for index files
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the hash index key column
    pub fn index_field(mut self, field: usize) -> Self {
        self.config.index_field = field;
        self
    }

    /// Set the number of decimal digits per index key
    pub fn key_digits(mut self, digits: u32) -> Self {
        self.config.key_digits = digits;
        self
    }

    /// Set the bucket capacity (entries per bucket)
    pub fn bucket_capacity(mut self, capacity: u32) -> Self {
        self.config.bucket_capacity = capacity;
        self
    }

    /// Set the presorted date column
    pub fn sort_field(mut self, field: usize) -> Self {
        self.config.sort_field = field;
        self
    }

    /// Set the chrono format of the sort column's dates
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.config.date_format = format.into();
        self
    }

    /// Set the columns printed per result row
    pub fn print_fields(mut self, fields: Vec<usize>) -> Self {
        self.config.print_fields = fields;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
