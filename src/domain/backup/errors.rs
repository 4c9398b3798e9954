//! Backup error taxonomy.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Failures of backup, preview, restore and wipe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackupError {
    /// The file is not a backup this version understands.
    #[error("Invalid backup file: {0}")]
    Format(String),

    /// The persistent store failed. Current data is unchanged.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The backup file could not be read or written.
    #[error("Could not access backup file: {0}")]
    Io(String),

    /// A restore failed midway and the rollback did not fully succeed.
    #[error("Restore failed and current data could not be fully recovered: {0}")]
    PartialRestore(String),
}

impl BackupError {
    pub fn format(reason: impl Into<String>) -> Self {
        BackupError::Format(reason.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BackupError::Format(_) => ErrorCode::BackupFormatInvalid,
            BackupError::Storage(_) => ErrorCode::StorageError,
            BackupError::Io(_) => ErrorCode::BackupFileError,
            BackupError::PartialRestore(_) => ErrorCode::PartialRestore,
        }
    }
}

impl From<BackupError> for DomainError {
    fn from(err: BackupError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
