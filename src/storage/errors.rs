//! Store-specific error types.
//!
//! These errors describe failures of the collection itself and know nothing
//! about request validation.

use std::fmt;

/// Errors that can occur during record store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A record with this id is already stored.
    RecordAlreadyExists { id: String },

    /// Generic internal store error.
    Internal { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::RecordAlreadyExists { id } => {
                write!(f, "Record already exists: {}", id)
            }
            StorageError::Internal { message } => write!(f, "Internal store error: {}", message),
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    /// Create a record already exists error.
    pub fn already_exists(id: impl Into<String>) -> Self {
        Self::RecordAlreadyExists { id: id.into() }
    }
}
