//! Key-value store port.
//!
//! The extension keeps notes, settings and the license record in one flat
//! JSON key-value store. Every call is atomic: a `set` either writes all of
//! its entries or none of them.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Entries read from or written to the store.
pub type StoreEntries = HashMap<String, Value>;

/// Errors that can occur during store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read from store: {0}")]
    ReadFailed(String),

    #[error("Failed to write to store: {0}")]
    WriteFailed(String),

    #[error("Failed to serialize store contents: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::new(ErrorCode::StorageError, err.to_string())
    }
}

/// Port for the persistent key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the given keys. Missing keys are absent from the result.
    async fn get(&self, keys: &[&str]) -> Result<StoreEntries, StoreError>;

    /// Read every entry in the store.
    async fn get_all(&self) -> Result<StoreEntries, StoreError>;

    /// Write all entries in one atomic step.
    async fn set(&self, entries: StoreEntries) -> Result<(), StoreError>;

    /// Remove the given keys. Unknown keys are ignored.
    async fn remove(&self, keys: &[&str]) -> Result<(), StoreError>;
}
