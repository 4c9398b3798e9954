//! The persisted license record and the rules that derive Pro status from it.

use serde_json::Value;
use std::collections::HashMap;

use super::{LicenseKey, LicenseTier};
use crate::domain::foundation::Timestamp;

/// Store key holding the license key string.
pub const LICENSE_KEY_FIELD: &str = "proLicenseKey";

/// Store key holding the expiry as an RFC 3339 string.
pub const LICENSE_EXPIRY_FIELD: &str = "proLicenseExpiry";

/// Both license fields, in the order they are read and removed.
pub const LICENSE_FIELDS: [&str; 2] = [LICENSE_KEY_FIELD, LICENSE_EXPIRY_FIELD];

/// Term granted when the license service confirms a key without an expiry.
pub const DEFAULT_LICENSE_TERM_DAYS: i64 = 365;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// License key and expiry as mirrored from storage.
///
/// Either field may be absent; a record missing either one is simply the
/// Free tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseRecord {
    key: Option<LicenseKey>,
    expiry: Option<Timestamp>,
}

impl LicenseRecord {
    /// A complete record, as written after a successful activation.
    pub fn new(key: LicenseKey, expiry: Timestamp) -> Self {
        Self {
            key: Some(key),
            expiry: Some(expiry),
        }
    }

    /// The Free-tier record with neither field present.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_parts(key: Option<LicenseKey>, expiry: Option<Timestamp>) -> Self {
        Self { key, expiry }
    }

    pub fn key(&self) -> Option<&LicenseKey> {
        self.key.as_ref()
    }

    pub fn expiry(&self) -> Option<Timestamp> {
        self.expiry
    }

    /// Active iff both fields are present and the expiry is strictly after `now`.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        match (&self.key, &self.expiry) {
            (Some(_), Some(expiry)) => expiry.is_after(&now),
            _ => false,
        }
    }

    pub fn tier_at(&self, now: Timestamp) -> LicenseTier {
        if self.is_active_at(now) {
            LicenseTier::Pro
        } else {
            LicenseTier::Free
        }
    }

    /// Whole days left, rounded up. Zero when the record is not active.
    pub fn remaining_days_at(&self, now: Timestamp) -> u32 {
        let Some(expiry) = self.expiry.filter(|_| self.is_active_at(now)) else {
            return 0;
        };
        let millis = expiry.duration_since(&now).num_milliseconds().max(0);
        let days = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// Rebuilds a record from the values returned by the store.
    ///
    /// Missing, empty or unreadable fields are treated as absent.
    pub fn from_stored(values: &HashMap<String, Value>) -> Self {
        let key = values
            .get(LICENSE_KEY_FIELD)
            .and_then(Value::as_str)
            .and_then(LicenseKey::from_stored);

        let expiry = values.get(LICENSE_EXPIRY_FIELD).and_then(|value| match value {
            Value::String(s) => match Timestamp::parse_rfc3339(LICENSE_EXPIRY_FIELD, s) {
                Ok(ts) => Some(ts),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unreadable stored license expiry");
                    None
                }
            },
            Value::Number(n) => n.as_i64().and_then(Timestamp::from_unix_millis),
            _ => None,
        });

        Self { key, expiry }
    }

    /// Store entries for the present fields.
    pub fn to_stored(&self) -> HashMap<String, Value> {
        let mut values = HashMap::new();
        if let Some(key) = &self.key {
            values.insert(
                LICENSE_KEY_FIELD.to_string(),
                Value::String(key.expose().to_string()),
            );
        }
        if let Some(expiry) = &self.expiry {
            values.insert(
                LICENSE_EXPIRY_FIELD.to_string(),
                Value::String(expiry.to_rfc3339()),
            );
        }
        values
    }
}

/// Returns true if `key` is one of the store keys owned by the license record.
pub fn is_license_field(key: &str) -> bool {
    LICENSE_FIELDS.contains(&key)
}
