//! Backup domain module.
//!
//! The snapshot format and its validation. Reading and writing files and
//! the store is done by the application layer.

mod errors;
mod snapshot;

pub use errors::BackupError;
pub use snapshot::{
    BackupData, BackupPreview, BackupSnapshot, BACKUP_FORMAT, BACKUP_VERSION, NOTES_KEY,
};
