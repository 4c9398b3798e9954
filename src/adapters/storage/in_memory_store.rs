//! In-Memory Key-Value Store Adapter
//!
//! Keeps store entries in memory. Used by tests and as a scratch store.
//! Failures can be injected to exercise rollback paths.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{KeyValueStore, StoreEntries, StoreError};

/// Injected failures.
#[derive(Debug, Default)]
struct FaultPlan {
    fail_reads: bool,
    /// Number of writes that still succeed before writes start failing.
    writes_before_failure: Option<usize>,
    /// Number of failing writes before the store recovers. `None` fails forever.
    failures_left: Option<usize>,
}

/// In-memory key-value store
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<StoreEntries>>,
    faults: Arc<RwLock<FaultPlan>>,
}

impl InMemoryKeyValueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `entries`
    pub fn with_entries(entries: StoreEntries) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
            faults: Arc::default(),
        }
    }

    /// Copy of the current contents (useful for assertions)
    pub async fn snapshot(&self) -> StoreEntries {
        self.entries.read().await.clone()
    }

    /// Make every read fail
    pub async fn fail_reads(&self) {
        self.faults.write().await.fail_reads = true;
    }

    /// Let `successful` more writes through, then fail every write
    pub async fn fail_writes_after(&self, successful: usize) {
        let mut faults = self.faults.write().await;
        faults.writes_before_failure = Some(successful);
        faults.failures_left = None;
    }

    /// Let `successful` more writes through, fail the next `failing` writes,
    /// then recover
    pub async fn fail_writes_between(&self, successful: usize, failing: usize) {
        let mut faults = self.faults.write().await;
        if failing == 0 {
            faults.writes_before_failure = None;
            faults.failures_left = None;
        } else {
            faults.writes_before_failure = Some(successful);
            faults.failures_left = Some(failing);
        }
    }

    /// Remove all injected failures
    pub async fn clear_faults(&self) {
        *self.faults.write().await = FaultPlan::default();
    }

    async fn check_read(&self) -> Result<(), StoreError> {
        if self.faults.read().await.fail_reads {
            return Err(StoreError::ReadFailed("injected read failure".to_string()));
        }
        Ok(())
    }

    async fn check_write(&self) -> Result<(), StoreError> {
        let mut guard = self.faults.write().await;
        let faults = &mut *guard;
        match faults.writes_before_failure {
            Some(0) => {
                if let Some(left) = faults.failures_left.as_mut() {
                    *left -= 1;
                    if *left == 0 {
                        faults.writes_before_failure = None;
                        faults.failures_left = None;
                    }
                }
                Err(StoreError::WriteFailed("injected write failure".to_string()))
            }
            Some(remaining) => {
                faults.writes_before_failure = Some(remaining - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, keys: &[&str]) -> Result<StoreEntries, StoreError> {
        self.check_read().await?;
        let entries = self.entries.read().await;
        Ok(keys
            .iter()
            .filter_map(|key| {
                entries
                    .get(*key)
                    .map(|value| (key.to_string(), value.clone()))
            })
            .collect())
    }

    async fn get_all(&self) -> Result<StoreEntries, StoreError> {
        self.check_read().await?;
        Ok(self.entries.read().await.clone())
    }

    async fn set(&self, new_entries: StoreEntries) -> Result<(), StoreError> {
        self.check_write().await?;
        self.entries.write().await.extend(new_entries);
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), StoreError> {
        self.check_write().await?;
        let mut entries = self.entries.write().await;
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}
