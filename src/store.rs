//! In-memory list of the data sources known to the server.
//!
//! The store is the canonical local copy: it is filled by [`SourceStore::load`]
//! and afterwards only changed by the synchronization layer once the server
//! has confirmed the corresponding change.

use log::{info, warn};

use crate::backend::{ApiError, DatasourceApi};
use crate::datasource::Record;

/// Errors raised by index-based store mutations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("index {index} out of range for a store of {len} data sources")]
    OutOfRange { index: usize, len: usize },
}

/// Ordered list of decorated data sources.
#[derive(Debug, Clone, Default)]
pub struct SourceStore {
    records: Vec<Record>,
}

impl SourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already fetched records, sorted by name.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        sort_by_name(&mut records);
        Self { records }
    }

    /// Replace the contents with the server's current list.
    ///
    /// Records are decorated for editing and sorted by name. If the request
    /// fails the previous contents are kept as they were.
    ///
    /// # Returns
    /// The number of data sources loaded
    pub async fn load(&mut self, api: &dyn DatasourceApi) -> Result<usize, ApiError> {
        let sources = match api.fetch_all().await {
            Ok(sources) => sources,
            Err(e) => {
                warn!("Keeping {} cached data sources, fetch failed: {}", self.records.len(), e);
                return Err(e);
            }
        };

        let mut records: Vec<Record> = sources.into_iter().map(Record::decorate).collect();
        sort_by_name(&mut records);
        self.records = records;

        info!("Loaded {} data sources", self.records.len());
        Ok(self.records.len())
    }

    /// Look up a data source by id
    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Index of the data source with this id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// Replace the entry at `index`, returning the previous one.
    ///
    /// Callers must only do this after the server confirmed the update.
    pub fn replace_at(&mut self, index: usize, record: Record) -> Result<Record, StoreError> {
        let len = self.records.len();
        let slot = self.records.get_mut(index).ok_or(StoreError::OutOfRange { index, len })?;
        Ok(std::mem::replace(slot, record))
    }

    /// Remove the entry at `index`.
    ///
    /// Callers must only do this after the server confirmed the deletion.
    pub fn remove_at(&mut self, index: usize) -> Result<Record, StoreError> {
        if index >= self.records.len() {
            return Err(StoreError::OutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    /// Append a newly created data source
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

fn sort_by_name(records: &mut [Record]) {
    records.sort_by_cached_key(|r| r.name().to_lowercase());
}
