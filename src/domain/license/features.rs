//! Static feature table and the Pro-only capability set.
//!
//! | Tier | Feature | Limit |
//! |------|---------|-------|
//! | Free | Basic Notes | Unlimited |
//! | Free | Local Storage | Full |
//! | Free | Text Formatting | Basic |
//! | Free | Manual Posting | Yes |
//! | Pro | Scheduled Posts | |
//! | Pro | Analytics | |
//! | Pro | Templates | |
//! | Pro | Priority Support | |

use once_cell::sync::Lazy;
use serde::Serialize;

use super::LicenseTier;

/// A product feature as listed in the Pro panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    /// Display name.
    pub name: &'static str,
    /// Usage-limit annotation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<&'static str>,
    /// Tier required to use the feature.
    pub tier: LicenseTier,
}

impl Feature {
    const fn free(name: &'static str, limit: &'static str) -> Self {
        Self {
            name,
            limit: Some(limit),
            tier: LicenseTier::Free,
        }
    }

    const fn pro(name: &'static str) -> Self {
        Self {
            name,
            limit: None,
            tier: LicenseTier::Pro,
        }
    }
}

/// Features partitioned by tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureTable {
    pub free: Vec<Feature>,
    pub pro: Vec<Feature>,
}

impl FeatureTable {
    /// The product's feature table.
    pub fn standard() -> &'static FeatureTable {
        &STANDARD_FEATURES
    }

    /// All features, free first.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.free.iter().chain(self.pro.iter())
    }
}

static STANDARD_FEATURES: Lazy<FeatureTable> = Lazy::new(|| FeatureTable {
    free: vec![
        Feature::free("Basic Notes", "Unlimited"),
        Feature::free("Local Storage", "Full"),
        Feature::free("Text Formatting", "Basic"),
        Feature::free("Manual Posting", "Yes"),
    ],
    pro: vec![
        Feature::pro("Scheduled Posts"),
        Feature::pro("Analytics"),
        Feature::pro("Templates"),
        Feature::pro("Priority Support"),
    ],
});

/// Capabilities that require an active Pro license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProCapability {
    Analytics,
    Scheduled,
    Templates,
    Priority,
    AdvancedPreviews,
}

impl ProCapability {
    pub const ALL: [ProCapability; 5] = [
        ProCapability::Analytics,
        ProCapability::Scheduled,
        ProCapability::Templates,
        ProCapability::Priority,
        ProCapability::AdvancedPreviews,
    ];

    /// Identifier used by callers of the gating check.
    pub fn id(&self) -> &'static str {
        match self {
            ProCapability::Analytics => "analytics",
            ProCapability::Scheduled => "scheduled",
            ProCapability::Templates => "templates",
            ProCapability::Priority => "priority",
            ProCapability::AdvancedPreviews => "advancedPreviews",
        }
    }

    /// Looks up a capability by its exact identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cap| cap.id() == id)
    }
}

/// Gating rule: free features are always available, Pro-only
/// capabilities only to Pro users.
pub fn is_feature_available(feature_id: &str, is_pro: bool) -> bool {
    match ProCapability::from_id(feature_id) {
        None => true,
        Some(_) => is_pro,
    }
}
