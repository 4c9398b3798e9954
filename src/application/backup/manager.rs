//! BackupManager - Exports, previews, restores and wipes user data.
//!
//! Restore is all-or-nothing from the user's point of view: the new entries
//! are written in one atomic `set`, stale entries are removed afterwards, and
//! if that second step fails the previous contents are written back.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use uuid::Uuid;

use crate::application::OperationResult;
use crate::domain::account::DeletionAuthorization;
use crate::domain::backup::{BackupError, BackupPreview, BackupSnapshot};
use crate::domain::foundation::Timestamp;
use crate::domain::license::is_license_field;
use crate::ports::{KeyValueStore, StoreEntries, StoreError};

/// Result of writing a backup file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupCreated {
    pub id: Uuid,
    pub path: PathBuf,
    /// Number of notes in the backup.
    pub count: usize,
    pub setting_count: usize,
}

impl BackupCreated {
    pub fn user_message(&self) -> String {
        format!(
            "Backup created successfully!\n{} notes backed up",
            self.count
        )
    }
}

/// Result of a completed restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreSummary {
    pub note_count: usize,
    pub setting_count: usize,
    pub removed_count: usize,
}

/// Result of wiping the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearSummary {
    pub removed_count: usize,
    pub license_preserved: bool,
}

fn storage_error(err: StoreError) -> BackupError {
    BackupError::Storage(err.to_string())
}

pub struct BackupManager {
    store: Arc<dyn KeyValueStore>,
}

impl BackupManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Writes all notes and settings to a backup file.
    ///
    /// If `destination` is a directory the file is named after the backup date.
    pub async fn create_backup(&self, destination: &Path) -> OperationResult<BackupCreated> {
        let result = self.try_create_backup(destination).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Backup failed");
        }
        result.into()
    }

    async fn try_create_backup(&self, destination: &Path) -> Result<BackupCreated, BackupError> {
        let entries = self.store.get_all().await.map_err(storage_error)?;
        let snapshot = BackupSnapshot::capture(entries, Timestamp::now())?;

        let path = match fs::metadata(destination).await {
            Ok(meta) if meta.is_dir() => destination.join(snapshot.file_name()),
            _ => destination.to_path_buf(),
        };

        let bytes = snapshot.to_json()?;
        fs::write(&path, bytes)
            .await
            .map_err(|e| BackupError::Io(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            backup_id = %snapshot.id,
            notes = snapshot.note_count,
            settings = snapshot.setting_count,
            path = %path.display(),
            "Backup created"
        );

        Ok(BackupCreated {
            id: snapshot.id,
            path,
            count: snapshot.note_count,
            setting_count: snapshot.setting_count,
        })
    }

    /// Reads and validates a backup file without touching the store.
    pub async fn preview_backup(&self, file: &Path) -> OperationResult<BackupPreview> {
        read_snapshot(file)
            .await
            .map(|snapshot| snapshot.preview())
            .into()
    }

    /// Replaces all notes and settings with the contents of `file`.
    ///
    /// `on_progress` receives a short message before each step. The license
    /// record is never touched.
    pub async fn restore_backup<F>(
        &self,
        file: &Path,
        mut on_progress: F,
    ) -> OperationResult<RestoreSummary>
    where
        F: FnMut(&str) + Send,
    {
        let result = self.try_restore(file, &mut on_progress).await;
        match &result {
            Ok(summary) => {
                on_progress("Restore complete");
                tracing::info!(
                    notes = summary.note_count,
                    settings = summary.setting_count,
                    removed = summary.removed_count,
                    "Backup restored"
                );
            }
            Err(err) => tracing::warn!(error = %err, code = %err.code(), "Restore failed"),
        }
        result.into()
    }

    async fn try_restore<F>(
        &self,
        file: &Path,
        on_progress: &mut F,
    ) -> Result<RestoreSummary, BackupError>
    where
        F: FnMut(&str) + Send,
    {
        on_progress("Reading backup file...");
        let bytes = read_file(file).await?;

        on_progress("Validating backup...");
        let snapshot = BackupSnapshot::parse(&bytes)?;
        let note_count = snapshot.note_count;
        let setting_count = snapshot.setting_count;

        on_progress("Saving current data...");
        let previous: StoreEntries = self
            .store
            .get_all()
            .await
            .map_err(storage_error)?
            .into_iter()
            .filter(|(key, _)| !is_license_field(key))
            .collect();

        let incoming = snapshot.into_entries();
        let stale: Vec<String> = previous
            .keys()
            .filter(|key| !incoming.contains_key(*key))
            .cloned()
            .collect();
        let added: Vec<String> = incoming
            .keys()
            .filter(|key| !previous.contains_key(*key))
            .cloned()
            .collect();

        on_progress("Restoring notes and settings...");
        // A failed set writes nothing, so there is nothing to undo.
        self.store.set(incoming).await.map_err(|e| {
            BackupError::Storage(format!("{}. Current data is unchanged", e))
        })?;

        if !stale.is_empty() {
            on_progress("Removing stale entries...");
            let stale_refs: Vec<&str> = stale.iter().map(String::as_str).collect();
            if let Err(err) = self.store.remove(&stale_refs).await {
                return Err(self.roll_back(previous, &added, err).await);
            }
        }

        Ok(RestoreSummary {
            note_count,
            setting_count,
            removed_count: stale.len(),
        })
    }

    /// Writes `previous` back after a failed restore and drops keys the
    /// restore added.
    async fn roll_back(
        &self,
        previous: StoreEntries,
        added: &[String],
        cause: StoreError,
    ) -> BackupError {
        tracing::warn!(error = %cause, "Restore interrupted, rolling back");

        let added_refs: Vec<&str> = added.iter().map(String::as_str).collect();
        let mut rollback = Ok(());
        if !previous.is_empty() {
            rollback = self.store.set(previous).await;
        }
        if rollback.is_ok() && !added_refs.is_empty() {
            rollback = self.store.remove(&added_refs).await;
        }

        match rollback {
            Ok(()) => BackupError::Storage(format!("{}. Current data was kept", cause)),
            Err(rollback_err) => BackupError::PartialRestore(format!(
                "{}; rollback also failed: {}",
                cause, rollback_err
            )),
        }
    }

    /// Erases stored data. With `preserve_license` the license record stays.
    ///
    /// Requires proof that the user passed the deletion confirmation.
    pub async fn clear_all_data(
        &self,
        _authorization: DeletionAuthorization,
        preserve_license: bool,
    ) -> OperationResult<ClearSummary> {
        let result = self.try_clear(preserve_license).await;
        match &result {
            Ok(summary) => tracing::info!(
                removed = summary.removed_count,
                license_preserved = preserve_license,
                "Cleared stored data"
            ),
            Err(err) => tracing::warn!(error = %err, "Clearing data failed"),
        }
        result.into()
    }

    async fn try_clear(&self, preserve_license: bool) -> Result<ClearSummary, BackupError> {
        let entries = self.store.get_all().await.map_err(storage_error)?;
        let doomed: Vec<&str> = entries
            .keys()
            .map(String::as_str)
            .filter(|key| !(preserve_license && is_license_field(key)))
            .collect();

        if !doomed.is_empty() {
            self.store.remove(&doomed).await.map_err(storage_error)?;
        }

        Ok(ClearSummary {
            removed_count: doomed.len(),
            license_preserved: preserve_license,
        })
    }
}

async fn read_file(file: &Path) -> Result<Vec<u8>, BackupError> {
    fs::read(file)
        .await
        .map_err(|e| BackupError::Io(format!("{}: {}", file.display(), e)))
}

async fn read_snapshot(file: &Path) -> Result<BackupSnapshot, BackupError> {
    let bytes = read_file(file).await?;
    BackupSnapshot::parse(&bytes)
}
