//! View model for the Pro panel.
//!
//! Built fresh from the entitlement status on every render. Any front end
//! (the CLI, a web view) draws it as it likes.

use serde::Serialize;
use std::fmt;

use crate::application::entitlement::LicenseStatus;
use crate::domain::license::{FeatureTable, LicenseTier};

/// Price shown in the upgrade offer.
pub const PRO_PRICE: &str = "$9.99/month";

/// Selling points shown in the upgrade offer.
pub const PRO_BENEFITS: [&str; 5] = [
    "Unlimited scheduled posts",
    "Post analytics & engagement tracking",
    "Best time to post recommendations",
    "Post templates & presets",
    "Priority support",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeOffer {
    pub price: &'static str,
    pub benefits: Vec<&'static str>,
}

impl UpgradeOffer {
    fn standard() -> Self {
        Self {
            price: PRO_PRICE,
            benefits: PRO_BENEFITS.to_vec(),
        }
    }
}

/// One feature in the features grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureTile {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<&'static str>,
    pub tier: LicenseTier,
    pub locked: bool,
}

/// Account-management actions offered to Pro users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountAction {
    Backup,
    Restore,
    DeleteAllData,
}

impl AccountAction {
    pub const ALL: [AccountAction; 3] = [
        AccountAction::Backup,
        AccountAction::Restore,
        AccountAction::DeleteAllData,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AccountAction::Backup => "Backup All Data",
            AccountAction::Restore => "Restore from Backup",
            AccountAction::DeleteAllData => "Delete All Data & Remove License",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    ActivateLicense,
    LicenseInfo,
}

impl PrimaryAction {
    pub fn label(&self) -> &'static str {
        match self {
            PrimaryAction::ActivateLicense => "Activate License",
            PrimaryAction::LicenseInfo => "License Info",
        }
    }
}

/// Everything the Pro panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProPanel {
    pub tier: LicenseTier,
    pub badge: &'static str,
    pub status_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_offer: Option<UpgradeOffer>,
    pub features: Vec<FeatureTile>,
    pub account_actions: Vec<AccountAction>,
    pub primary_action: PrimaryAction,
}

impl ProPanel {
    pub fn build(status: &LicenseStatus, features: &FeatureTable) -> Self {
        let is_pro = status.tier.is_paid();

        let status_line = if is_pro {
            format!(
                "Your Pro license expires in {} days",
                status.remaining_days
            )
        } else {
            "Upgrade to Pro to unlock advanced features".to_string()
        };

        let features = features
            .iter()
            .map(|feature| FeatureTile {
                name: feature.name,
                limit: feature.limit,
                tier: feature.tier,
                locked: feature.tier.is_paid() && !is_pro,
            })
            .collect();

        Self {
            tier: status.tier,
            badge: status.tier.badge(),
            status_line,
            upgrade_offer: (!is_pro).then(UpgradeOffer::standard),
            features,
            account_actions: if is_pro {
                AccountAction::ALL.to_vec()
            } else {
                Vec::new()
            },
            primary_action: if is_pro {
                PrimaryAction::LicenseInfo
            } else {
                PrimaryAction::ActivateLicense
            },
        }
    }
}

impl fmt::Display for ProPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.badge)?;
        writeln!(f, "{}", self.status_line)?;

        if let Some(offer) = &self.upgrade_offer {
            writeln!(f)?;
            writeln!(f, "Upgrade to Pro - {}", offer.price)?;
            for benefit in &offer.benefits {
                writeln!(f, "  + {}", benefit)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Available Features")?;
        for tile in &self.features {
            let mark = if tile.locked { "locked" } else { "ok" };
            match tile.limit {
                Some(limit) => writeln!(f, "  [{}] {} ({})", mark, tile.name, limit)?,
                None => writeln!(f, "  [{}] {}", mark, tile.name)?,
            }
        }

        if !self.account_actions.is_empty() {
            writeln!(f)?;
            writeln!(f, "Account Management")?;
            for action in &self.account_actions {
                writeln!(f, "  - {}", action.label())?;
            }
        }

        writeln!(f)?;
        write!(f, "> {}", self.primary_action.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn free_status() -> LicenseStatus {
        LicenseStatus {
            tier: LicenseTier::Free,
            remaining_days: 0,
            expires_at: None,
            key_hint: None,
        }
    }

    fn pro_status(days: u32) -> LicenseStatus {
        LicenseStatus {
            tier: LicenseTier::Pro,
            remaining_days: days,
            expires_at: Some(Timestamp::now().plus_days(days.into())),
            key_hint: Some("****ABCD".to_string()),
        }
    }

    #[test]
    fn free_panel_offers_upgrade_and_locks_pro_tiles() {
        let panel = ProPanel::build(&free_status(), FeatureTable::standard());
        assert_eq!(panel.badge, "FREE PLAN");
        assert_eq!(panel.status_line, "Upgrade to Pro to unlock advanced features");
        assert_eq!(panel.upgrade_offer.as_ref().map(|o| o.price), Some("$9.99/month"));
        assert!(panel.account_actions.is_empty());
        assert_eq!(panel.primary_action.label(), "Activate License");

        for tile in &panel.features {
            assert_eq!(tile.locked, tile.tier == LicenseTier::Pro);
        }
    }

    #[test]
    fn pro_panel_shows_days_and_account_actions() {
        let panel = ProPanel::build(&pro_status(30), FeatureTable::standard());
        assert_eq!(panel.badge, "PRO ACTIVE");
        assert_eq!(panel.status_line, "Your Pro license expires in 30 days");
        assert!(panel.upgrade_offer.is_none());
        assert!(panel.features.iter().all(|t| !t.locked));
        assert_eq!(panel.account_actions, AccountAction::ALL.to_vec());
        assert_eq!(panel.primary_action.label(), "License Info");
    }

    #[test]
    fn text_rendering_includes_badge_and_features() {
        let text = ProPanel::build(&free_status(), FeatureTable::standard()).to_string();
        assert!(text.starts_with("[FREE PLAN]"));
        assert!(text.contains("Basic Notes (Unlimited)"));
        assert!(text.contains("[locked] Analytics"));
        assert!(text.ends_with("> Activate License"));
    }
}
