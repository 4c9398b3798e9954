//! JSON File Key-Value Store Adapter
//!
//! Persists the whole store as one JSON object on disk. Every mutation
//! rewrites the file through a temporary sibling and a rename, so a crash
//! never leaves a half-written store behind.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::ports::{KeyValueStore, StoreEntries, StoreError};

/// File-backed key-value store
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles.
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store backed by `path`. The file is created on first write.
    ///
    /// # Example
    /// ```ignore
    /// let store = JsonFileStore::new("./skypost-data.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Read the file. A missing file is an empty store.
    async fn read_entries(&self) -> Result<StoreEntries, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StoreEntries::new()),
            Err(e) => return Err(StoreError::ReadFailed(e.to_string())),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(StoreEntries::new());
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(map.into_iter().collect()),
            Ok(_) => Err(StoreError::SerializationFailed(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(StoreError::SerializationFailed(e.to_string())),
        }
    }

    async fn write_entries(&self, entries: &StoreEntries) -> Result<(), StoreError> {
        let object: serde_json::Map<String, Value> = entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let json = serde_json::to_vec_pretty(&Value::Object(object))
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::IoError(e.to_string()))?;
        }

        let temp = self.temp_path();
        fs::write(&temp, json)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, keys: &[&str]) -> Result<StoreEntries, StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        Ok(keys
            .iter()
            .filter_map(|key| entries.remove_entry(*key))
            .collect())
    }

    async fn get_all(&self) -> Result<StoreEntries, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_entries().await
    }

    async fn set(&self, new_entries: StoreEntries) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.extend(new_entries);
        self.write_entries(&entries).await
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() == before {
            return Ok(());
        }
        self.write_entries(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("data.json"))
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        store_in(&dir)
            .set([("theme".to_string(), json!("dark"))].into_iter().collect())
            .await
            .unwrap();

        let reopened = store_in(&dir);
        let values = reopened.get(&["theme", "missing"]).await.unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("theme"), Some(&json!("dark")));
    }

    #[tokio::test]
    async fn remove_deletes_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .set(
                [
                    ("a".to_string(), json!(1)),
                    ("b".to_string(), json!(2)),
                ]
                .into_iter()
                .collect(),
            )
            .await
            .unwrap();
        store.remove(&["a"]).await.unwrap();
        let all = store.get_all().await.unwrap();
        assert!(!all.contains_key("a"));
        assert!(all.contains_key("b"));
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .set([("a".to_string(), json!(1))].into_iter().collect())
            .await
            .unwrap();
        assert!(!dir.path().join("data.json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("data.json"), b"{ not json").unwrap();
        let store = store_in(&dir);
        assert!(matches!(
            store.get_all().await,
            Err(StoreError::SerializationFailed(_))
        ));
    }

    #[tokio::test]
    async fn non_object_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("data.json"), b"[1, 2, 3]").unwrap();
        let store = store_in(&dir);
        assert!(store.get_all().await.is_err());
    }
}
