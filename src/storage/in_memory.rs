//! In-memory record store.
//!
//! Records live in a `Vec` behind a tokio `RwLock`, so list order is
//! insertion order. Lookups are linear scans.
//!
//! Each call takes the lock once. A sequence of calls is not atomic.

use crate::storage::{Record, RecordStore, StorageError};
use log::trace;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe ordered in-memory store.
///
/// Cloning the store yields a handle to the same collection.
#[derive(Debug, Clone)]
pub struct InMemoryStore<T: Record> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> InMemoryStore<T> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a store preloaded with records, kept in the given order.
    ///
    /// Later duplicates of an id are dropped so ids stay unique.
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let mut unique: Vec<T> = Vec::new();
        for record in records {
            if !unique.iter().any(|r| r.id() == record.id()) {
                unique.push(record);
            }
        }
        Self {
            records: Arc::new(RwLock::new(unique)),
        }
    }

    /// Remove every record (useful for testing).
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

impl<T: Record> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordStore<T> for InMemoryStore<T> {
    type Error = StorageError;

    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        let records = self.records.read().await;
        trace!("Listing {} records", records.len());
        Ok(records.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<T>, Self::Error> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, record: T) -> Result<T, Self::Error> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(StorageError::already_exists(record.id()));
        }
        trace!("Inserting record {}", record.id());
        records.push(record.clone());
        Ok(record)
    }

    async fn replace(&self, record: T) -> Result<Option<T>, Self::Error> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                trace!("Replacing record {}", record.id());
                *slot = record.clone();
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, id: &str) -> Result<bool, Self::Error> {
        let mut records = self.records.write().await;
        match records.iter().position(|r| r.id() == id) {
            Some(index) => {
                trace!("Removing record {} at position {}", id, index);
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<usize, Self::Error> {
        Ok(self.records.read().await.len())
    }
}
