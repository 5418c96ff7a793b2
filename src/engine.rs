//! Engine Module
//!
//! Ties the record store to its two lookup paths.
//!
//! ## Responsibilities
//! - Open the store and validate the configured columns
//! - Build the hash index in one pass before any query is served
//! - Route queries to the hash index or the sorted date scan

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{RecdexError, Result};
use crate::index::ExtendibleHashIndex;
use crate::query::Query;
use crate::scan::{DateKey, SortedKeyScanner};
use crate::store::{RecordStore, Row};

/// A record store with its hash index and date scan
///
/// Single-threaded: the index is fully built by `open`, after which
/// queries only read.
pub struct Database {
    config: Config,
    store: RecordStore,
    index: ExtendibleHashIndex,
    date_key: DateKey,
}

impl Database {
    /// Open the store and build the index
    ///
    /// On startup:
    /// 1. Validate config
    /// 2. Open the record store (header checks)
    /// 3. Create the index directory
    /// 4. Build the hash index over every row
    pub fn open(config: Config) -> Result<Self> {
        // Step 1: Reject unusable settings up front
        config.validate()?;

        // Step 2: Open store
        let store = RecordStore::open(&config.store_path)?;
        if store.schema().field(config.sort_field).is_none() {
            return Err(RecdexError::Config(format!(
                "sort field {} is beyond the {}-field schema",
                config.sort_field,
                store.schema().len()
            )));
        }

        // Step 3: Index directory
        fs::create_dir_all(&config.data_dir)?;

        // Step 4: Build index
        let index = ExtendibleHashIndex::build(
            &store,
            config.index_field,
            &config.bucket_path(),
            config.index_config(),
        )?;

        let date_key = DateKey::new(config.date_format.clone());

        Ok(Self {
            config,
            store,
            index,
            date_key,
        })
    }

    /// Open with a store path (convenience method)
    ///
    /// Uses default config with index files next to the store
    pub fn open_path(path: &Path) -> Result<Self> {
        let data_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let config = Config::builder()
            .store_path(path)
            .data_dir(data_dir)
            .build();
        Self::open(config)
    }

    /// Execute a query
    ///
    /// Routes queries to the matching lookup path
    pub fn execute(&self, query: &Query) -> Result<Vec<Row>> {
        match query {
            Query::Prefix(prefix) => self.prefix_query(prefix),
            Query::Date(date) => self.date_scanner()?.query_rows(date),
        }
    }

    /// Rows whose index key starts with `prefix`
    pub fn prefix_query(&self, prefix: &str) -> Result<Vec<Row>> {
        self.index.query_rows(prefix, &self.store)
    }

    /// Scanner over the configured sort column
    pub fn date_scanner(&self) -> Result<SortedKeyScanner<'_, DateKey>> {
        SortedKeyScanner::new(&self.store, self.config.sort_field, self.date_key.clone())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn index(&self) -> &ExtendibleHashIndex {
        &self.index
    }

    pub fn date_key(&self) -> &DateKey {
        &self.date_key
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
