//! Portable snapshot of user notes and settings.
//!
//! A snapshot is a JSON document:
//!
//! ```json
//! {
//!   "format": "skypost-backup",
//!   "version": 1,
//!   "id": "…",
//!   "createdAt": "2026-10-18T09:00:00Z",
//!   "noteCount": 2,
//!   "settingCount": 1,
//!   "checksum": "<sha256 of data>",
//!   "data": { "notes": [ … ], "settings": { … } }
//! }
//! ```
//!
//! Notes live under the `notes` store key. Every other store key except the
//! license fields is a setting. The license record is never exported.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use super::BackupError;
use crate::domain::foundation::Timestamp;
use crate::domain::license::is_license_field;

/// Format tag written into every snapshot.
pub const BACKUP_FORMAT: &str = "skypost-backup";

/// Current snapshot layout version.
pub const BACKUP_VERSION: u32 = 1;

/// Store key holding the note list.
pub const NOTES_KEY: &str = "notes";

/// The exported user data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupData {
    #[serde(default)]
    pub notes: Vec<Value>,
    #[serde(default)]
    pub settings: BTreeMap<String, Value>,
}

impl BackupData {
    /// Hex SHA-256 of the canonical JSON encoding.
    fn checksum(&self) -> Result<String, BackupError> {
        let bytes = serde_json::to_vec(self)
            .map_err(|e| BackupError::format(format!("could not encode backup data: {}", e)))?;
        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }
}

/// Summary shown to the user before a restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupPreview {
    pub id: Uuid,
    pub date: Timestamp,
    pub note_count: usize,
    pub setting_count: usize,
}

/// A self-describing export of notes and settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    pub format: String,
    pub version: u32,
    pub id: Uuid,
    pub created_at: Timestamp,
    pub note_count: usize,
    pub setting_count: usize,
    pub checksum: String,
    pub data: BackupData,
}

impl BackupSnapshot {
    /// Builds a snapshot from the full contents of the store.
    pub fn capture(
        mut entries: HashMap<String, Value>,
        created_at: Timestamp,
    ) -> Result<Self, BackupError> {
        let notes = match entries.remove(NOTES_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(notes)) => notes,
            Some(_) => return Err(BackupError::format("stored notes are not a list")),
        };

        let settings: BTreeMap<String, Value> = entries
            .into_iter()
            .filter(|(key, _)| !is_license_field(key))
            .collect();

        let data = BackupData { notes, settings };
        let checksum = data.checksum()?;

        Ok(Self {
            format: BACKUP_FORMAT.to_string(),
            version: BACKUP_VERSION,
            id: Uuid::new_v4(),
            created_at,
            note_count: data.notes.len(),
            setting_count: data.settings.len(),
            checksum,
            data,
        })
    }

    /// Parses and validates a backup file's contents.
    pub fn parse(bytes: &[u8]) -> Result<Self, BackupError> {
        let snapshot: Self = serde_json::from_slice(bytes)
            .map_err(|e| BackupError::format(format!("not a SkyPost backup ({})", e)))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), BackupError> {
        if self.format != BACKUP_FORMAT {
            return Err(BackupError::format(format!(
                "unrecognized backup format '{}'",
                self.format
            )));
        }
        if self.version == 0 || self.version > BACKUP_VERSION {
            return Err(BackupError::format(format!(
                "unsupported backup version {}",
                self.version
            )));
        }
        if self.note_count != self.data.notes.len() {
            return Err(BackupError::format("note count does not match contents"));
        }
        if self.setting_count != self.data.settings.len() {
            return Err(BackupError::format("setting count does not match contents"));
        }
        if self
            .data
            .settings
            .keys()
            .any(|key| key == NOTES_KEY || is_license_field(key))
        {
            return Err(BackupError::format("backup contains reserved entries"));
        }
        if self.checksum != self.data.checksum()? {
            return Err(BackupError::format("checksum mismatch, the file is damaged"));
        }
        Ok(())
    }

    /// Pretty-printed JSON for writing to disk.
    pub fn to_json(&self) -> Result<Vec<u8>, BackupError> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| BackupError::format(format!("could not encode backup: {}", e)))
    }

    /// Suggested file name, e.g. `skypost-backup-2026-10-18.json`.
    pub fn file_name(&self) -> String {
        format!(
            "skypost-backup-{}.json",
            self.created_at.as_datetime().format("%Y-%m-%d")
        )
    }

    pub fn preview(&self) -> BackupPreview {
        BackupPreview {
            id: self.id,
            date: self.created_at,
            note_count: self.note_count,
            setting_count: self.setting_count,
        }
    }

    /// Store entries to write back. Always includes the note list, so a
    /// restore replaces notes even when the backup has none.
    pub fn into_entries(self) -> HashMap<String, Value> {
        let mut entries: HashMap<String, Value> = self.data.settings.into_iter().collect();
        entries.insert(NOTES_KEY.to_string(), Value::Array(self.data.notes));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_contents() -> HashMap<String, Value> {
        [
            ("notes".to_string(), json!([{"id": 1, "text": "hello"}, {"id": 2, "text": "world"}])),
            ("theme".to_string(), json!("dark")),
            ("proLicenseKey".to_string(), json!("GOOD-KEY")),
            ("proLicenseExpiry".to_string(), json!("2030-01-01T00:00:00.000Z")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn capture_splits_notes_and_settings_and_skips_license() {
        let snapshot = BackupSnapshot::capture(store_contents(), Timestamp::now()).unwrap();
        assert_eq!(snapshot.note_count, 2);
        assert_eq!(snapshot.setting_count, 1);
        assert!(snapshot.data.settings.contains_key("theme"));
        assert!(!snapshot.data.settings.contains_key("proLicenseKey"));
    }

    #[test]
    fn capture_of_empty_store_is_valid() {
        let snapshot = BackupSnapshot::capture(HashMap::new(), Timestamp::now()).unwrap();
        assert_eq!(snapshot.note_count, 0);
        let bytes = snapshot.to_json().unwrap();
        assert!(BackupSnapshot::parse(&bytes).is_ok());
    }

    #[test]
    fn capture_rejects_non_list_notes() {
        let entries: HashMap<String, Value> =
            [("notes".to_string(), json!("oops"))].into_iter().collect();
        assert!(BackupSnapshot::capture(entries, Timestamp::now()).is_err());
    }

    #[test]
    fn parse_accepts_written_snapshot() {
        let snapshot = BackupSnapshot::capture(store_contents(), Timestamp::now()).unwrap();
        let parsed = BackupSnapshot::parse(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn fractional_numbers_survive_round_trip() {
        let entries: HashMap<String, Value> = [
            ("notes".to_string(), json!([{"score": 9480.300552478155}, {"x": 0.1, "y": -2.5e-7}])),
            ("fontScale".to_string(), json!(1.15)),
            ("ratio".to_string(), json!(std::f64::consts::PI)),
        ]
        .into_iter()
        .collect();
        let snapshot = BackupSnapshot::capture(entries, Timestamp::now()).unwrap();
        let parsed = BackupSnapshot::parse(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn parse_rejects_non_json() {
        let err = BackupSnapshot::parse(b"definitely not json").unwrap_err();
        assert!(matches!(err, BackupError::Format(_)));
    }

    #[test]
    fn parse_rejects_foreign_format_tag() {
        let mut snapshot = BackupSnapshot::capture(store_contents(), Timestamp::now()).unwrap();
        snapshot.format = "other-app".to_string();
        let err = BackupSnapshot::parse(&snapshot.to_json().unwrap()).unwrap_err();
        assert!(err.to_string().contains("unrecognized backup format"));
    }

    #[test]
    fn parse_rejects_future_version() {
        let mut snapshot = BackupSnapshot::capture(store_contents(), Timestamp::now()).unwrap();
        snapshot.version = BACKUP_VERSION + 1;
        let err = BackupSnapshot::parse(&snapshot.to_json().unwrap()).unwrap_err();
        assert!(err.to_string().contains("unsupported backup version"));
    }

    #[test]
    fn parse_detects_tampered_data() {
        let mut snapshot = BackupSnapshot::capture(store_contents(), Timestamp::now()).unwrap();
        snapshot
            .data
            .settings
            .insert("theme".to_string(), json!("light"));
        let err = BackupSnapshot::parse(&snapshot.to_json().unwrap()).unwrap_err();
        assert!(err.to_string().contains("checksum mismatch"));
    }

    #[test]
    fn parse_rejects_wrong_counts() {
        let mut snapshot = BackupSnapshot::capture(store_contents(), Timestamp::now()).unwrap();
        snapshot.note_count = 99;
        let err = BackupSnapshot::parse(&snapshot.to_json().unwrap()).unwrap_err();
        assert!(err.to_string().contains("note count"));
    }

    #[test]
    fn into_entries_always_writes_notes() {
        let snapshot = BackupSnapshot::capture(HashMap::new(), Timestamp::now()).unwrap();
        let entries = snapshot.into_entries();
        assert_eq!(entries.get("notes"), Some(&json!([])));
    }

    #[test]
    fn file_name_uses_creation_date() {
        let created = Timestamp::parse_rfc3339("t", "2026-10-18T09:00:00Z").unwrap();
        let snapshot = BackupSnapshot::capture(HashMap::new(), created).unwrap();
        assert_eq!(snapshot.file_name(), "skypost-backup-2026-10-18.json");
    }

    #[test]
    fn preview_reports_counts() {
        let snapshot = BackupSnapshot::capture(store_contents(), Timestamp::now()).unwrap();
        let preview = snapshot.preview();
        assert_eq!(preview.note_count, 2);
        assert_eq!(preview.setting_count, 1);
        assert_eq!(preview.date, snapshot.created_at);
    }
}
