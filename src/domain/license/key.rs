//! License key value object.
//!
//! The key is an opaque token issued by the license service. It is held in a
//! `SecretString` so it never leaks through `Debug` output or logs.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Test key shipped in early builds. Stored copies are purged on load.
pub const RETIRED_TEST_KEY: &str = "BLUESKY-PRO-TEST-2025-UNLIMITED";

/// An opaque license key.
#[derive(Clone)]
pub struct LicenseKey(SecretString);

impl LicenseKey {
    /// Parses a key typed by the user. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("license_key"));
        }
        Ok(Self(SecretString::new(trimmed.to_string())))
    }

    /// Wraps a value read back from storage. Empty strings count as absent.
    pub fn from_stored(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(Self(SecretString::new(raw.to_string())))
        }
    }

    /// Returns the raw key for transmission or persistence.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Returns true if this is the retired test key.
    pub fn is_retired_test_key(&self) -> bool {
        self.expose() == RETIRED_TEST_KEY
    }

    /// Last four characters, for log lines.
    pub fn masked(&self) -> String {
        let tail: String = {
            let chars: Vec<char> = self.expose().chars().collect();
            if chars.len() <= 4 {
                String::new()
            } else {
                chars[chars.len() - 4..].iter().collect()
            }
        };
        format!("****{}", tail)
    }
}

impl PartialEq for LicenseKey {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for LicenseKey {}

impl fmt::Debug for LicenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LicenseKey({})", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let key = LicenseKey::parse("  SKY-1234-ABCD \n").unwrap();
        assert_eq!(key.expose(), "SKY-1234-ABCD");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(LicenseKey::parse("   ").is_err());
        assert!(LicenseKey::parse("").is_err());
    }

    #[test]
    fn stored_empty_string_is_absent() {
        assert!(LicenseKey::from_stored("").is_none());
        assert!(LicenseKey::from_stored("SKY-1").is_some());
    }

    #[test]
    fn detects_retired_test_key() {
        let key = LicenseKey::parse(RETIRED_TEST_KEY).unwrap();
        assert!(key.is_retired_test_key());
        assert!(!LicenseKey::parse("GOOD-KEY").unwrap().is_retired_test_key());
    }

    #[test]
    fn debug_does_not_leak_key() {
        let key = LicenseKey::parse("SKY-SECRET-9876").unwrap();
        let debug = format!("{:?}", key);
        assert_eq!(debug, "LicenseKey(****9876)");
        assert!(!debug.contains("SECRET"));
    }

    #[test]
    fn short_keys_are_fully_masked() {
        let key = LicenseKey::parse("ABC").unwrap();
        assert_eq!(key.masked(), "****");
    }
}
