//! Answer of a feature gate, with the reason when the answer is no.

use serde::Serialize;
use std::fmt;

use super::LicenseTier;

/// Outcome of checking one feature against the current license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessResult {
    Allowed,
    Denied(AccessDeniedReason),
}

impl AccessResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessResult::Allowed)
    }

    pub fn is_denied(&self) -> bool {
        !self.is_allowed()
    }

    /// The denial, if any.
    pub fn denial(&self) -> Option<&AccessDeniedReason> {
        match self {
            AccessResult::Allowed => None,
            AccessResult::Denied(reason) => Some(reason),
        }
    }
}

/// A feature the user tried to use and the tier it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDeniedReason {
    pub feature: String,
    pub required_tier: LicenseTier,
}

impl AccessDeniedReason {
    pub fn pro_required(feature: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            required_tier: LicenseTier::Pro,
        }
    }

    /// Text shown to the user in place of the feature.
    pub fn user_message(&self) -> String {
        format!(
            "{} needs a {} license. Upgrade to Pro to unlock it.",
            self.feature,
            self.required_tier.display_name()
        )
    }
}

impl fmt::Display for AccessDeniedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}
