//! License domain module.
//!
//! Pro/Free status, the persisted license record and feature gating.
//!
//! # Module Structure
//!
//! - `access` - Access check results with user-facing denial reasons
//! - `errors` - License and checkout error taxonomy
//! - `features` - Static feature table and Pro-only capability set
//! - `key` - Opaque license key value object
//! - `record` - Persisted key/expiry pair and the Pro status rules
//! - `tier` - Free / Pro tiers

mod access;
mod errors;
mod features;
mod key;
mod record;
mod tier;

pub use access::{AccessDeniedReason, AccessResult};
pub use errors::{CheckoutError, LicenseError};
pub use features::{is_feature_available, Feature, FeatureTable, ProCapability};
pub use key::{LicenseKey, RETIRED_TEST_KEY};
pub use record::{
    is_license_field, LicenseRecord, DEFAULT_LICENSE_TERM_DAYS, LICENSE_EXPIRY_FIELD,
    LICENSE_FIELDS, LICENSE_KEY_FIELD,
};
pub use tier::LicenseTier;
