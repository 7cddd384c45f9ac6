//! Storage abstraction for dishes and orders.
//!
//! A [`RecordStore`] owns one ordered collection of records of a single type.
//! Stores are injected into the dispatch pipelines, so tests get isolated
//! state and other backends can replace the in-memory one.
//!
//! The store knows nothing about validation or status codes. It only keeps
//! records in insertion order and finds them by id.
//!
//! # Example Usage
//!
//! ```rust
//! use grubdash::resource::Dish;
//! use grubdash::storage::{InMemoryStore, RecordStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryStore::new();
//! let dish = Dish {
//!     id: "d1".to_string(),
//!     name: "Pasta".to_string(),
//!     description: "Tasty".to_string(),
//!     price: 12,
//!     image_url: "http://x".to_string(),
//! };
//! store.insert(dish).await?;
//!
//! let found = store.get("d1").await?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;

pub use errors::StorageError;
pub use in_memory::InMemoryStore;

use std::future::Future;

/// A stored entity with an immutable identifier.
pub trait Record: Clone + Send + Sync + 'static {
    /// The record's identifier.
    fn id(&self) -> &str;
}

/// Ordered collection of records addressed by id.
///
/// # Behavior
///
/// - `list` returns records in insertion order
/// - ids are unique; `insert` refuses a record whose id is already stored
/// - `replace` keeps the record's position in the collection
pub trait RecordStore<T: Record>: Send + Sync {
    /// The error type returned by store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return every record in storage order.
    fn list(&self) -> impl Future<Output = Result<Vec<T>, Self::Error>> + Send;

    /// Look up a record by id.
    fn get(&self, id: &str) -> impl Future<Output = Result<Option<T>, Self::Error>> + Send;

    /// Append a new record and return it.
    fn insert(&self, record: T) -> impl Future<Output = Result<T, Self::Error>> + Send;

    /// Overwrite the stored record that has the same id.
    ///
    /// Returns `None` when no record has that id; nothing is stored then.
    fn replace(&self, record: T) -> impl Future<Output = Result<Option<T>, Self::Error>> + Send;

    /// Remove a record by id.
    ///
    /// Returns `true` if the record existed.
    fn remove(&self, id: &str) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Number of stored records.
    fn count(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send;
}
