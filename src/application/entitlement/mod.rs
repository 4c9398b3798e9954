//! License entitlement: loading, activation and gating.

mod manager;

pub use manager::{Activation, EntitlementManager, LicenseStatus, ACTIVATION_SUCCESS_MESSAGE};
