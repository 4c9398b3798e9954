//! Backup, restore and wipe of user data.

mod manager;

pub use manager::{BackupCreated, BackupManager, ClearSummary, RestoreSummary};
