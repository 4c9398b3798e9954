//! License tier definitions.
//!
//! A user is either on the Free plan or holds an active Pro license.

use serde::{Deserialize, Serialize};

/// Entitlement tier.
///
/// Also used to classify features: a feature's tier is the tier a user must
/// hold to use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseTier {
    /// No active license. Free features only.
    Free,

    /// Active, unexpired Pro license.
    Pro,
}

impl LicenseTier {
    /// Returns true if this tier is the paid tier.
    pub fn is_paid(&self) -> bool {
        matches!(self, LicenseTier::Pro)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            LicenseTier::Free => "Free",
            LicenseTier::Pro => "Pro",
        }
    }

    /// Returns the status badge shown in the Pro panel.
    pub fn badge(&self) -> &'static str {
        match self {
            LicenseTier::Free => "FREE PLAN",
            LicenseTier::Pro => "PRO ACTIVE",
        }
    }
}

impl std::fmt::Display for LicenseTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
