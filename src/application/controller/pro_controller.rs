//! ProController - Drives the Pro panel.
//!
//! Holds no entitlement state of its own. Every decision reads the
//! `EntitlementManager`, and every account action re-checks Pro status.

use std::path::Path;
use std::sync::Arc;

use crate::application::backup::BackupManager;
use crate::application::entitlement::EntitlementManager;
use crate::application::OperationResult;
use crate::domain::account::{authorize_deletion, ConfirmationDecision};
use crate::domain::backup::BackupPreview;
use crate::domain::license::{AccessDeniedReason, CheckoutError};
use crate::ports::{CheckoutProvider, LinkedSession, ServiceError, TabOpener};

use super::view::{AccountAction, ProPanel};

/// Shown when a Free user reaches a Pro-only action.
pub const PRO_REQUIRED_MESSAGE: &str = "Pro license required";

pub const CHECKOUT_OPENED_MESSAGE: &str =
    "Stripe checkout opened. Complete your purchase to activate Pro!";

pub const RESTORE_SUCCESS_MESSAGE: &str = "Data restored successfully!";

pub const DELETE_SUCCESS_MESSAGE: &str = "All data and license removed.";

/// What the UI should tell the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerOutcome {
    Completed { message: String },
    Failed { message: String },
    /// Nothing happened, usually because the user backed out.
    Cancelled { reason: String },
    /// The user must confirm `message` before the action runs.
    NeedsConfirmation { message: String },
}

impl ControllerOutcome {
    fn completed(message: impl Into<String>) -> Self {
        ControllerOutcome::Completed {
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        ControllerOutcome::Failed {
            message: message.into(),
        }
    }

    fn cancelled(reason: impl Into<String>) -> Self {
        ControllerOutcome::Cancelled {
            reason: reason.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ControllerOutcome::Completed { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            ControllerOutcome::Completed { message }
            | ControllerOutcome::Failed { message }
            | ControllerOutcome::NeedsConfirmation { message } => message,
            ControllerOutcome::Cancelled { reason } => reason,
        }
    }
}

/// Text of the restore confirmation.
pub fn restore_confirmation_message(preview: &BackupPreview) -> String {
    format!(
        "Restore backup from {}?\n\nThis will restore:\n• {} notes\n• {} settings\n\nCurrent data will be replaced.",
        preview.date.display_date(),
        preview.note_count,
        preview.setting_count
    )
}

pub struct ProController {
    entitlements: Arc<EntitlementManager>,
    backups: Arc<BackupManager>,
    checkout: Arc<dyn CheckoutProvider>,
    tabs: Arc<dyn TabOpener>,
    linked_session: Arc<dyn LinkedSession>,
}

impl ProController {
    pub fn new(
        entitlements: Arc<EntitlementManager>,
        backups: Arc<BackupManager>,
        checkout: Arc<dyn CheckoutProvider>,
        tabs: Arc<dyn TabOpener>,
        linked_session: Arc<dyn LinkedSession>,
    ) -> Self {
        Self {
            entitlements,
            backups,
            checkout,
            tabs,
            linked_session,
        }
    }

    pub fn render(&self) -> ProPanel {
        ProPanel::build(
            &self.entitlements.status(),
            self.entitlements.get_feature_list(),
        )
    }

    fn require_pro(&self, action: AccountAction) -> Result<(), ControllerOutcome> {
        if self.entitlements.is_pro_user() {
            return Ok(());
        }
        let reason = AccessDeniedReason::pro_required(action.label());
        tracing::info!(action = ?action, reason = %reason, "Refused Pro-only action");
        Err(ControllerOutcome::failed(PRO_REQUIRED_MESSAGE))
    }

    /// Opens a checkout page for `email`.
    pub async fn start_checkout(&self, email: Option<&str>) -> ControllerOutcome {
        let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
            return ControllerOutcome::cancelled("No email entered");
        };

        match self.try_checkout(email).await {
            Ok(()) => ControllerOutcome::completed(CHECKOUT_OPENED_MESSAGE),
            Err(err) => {
                tracing::warn!(error = %err, "Checkout failed");
                ControllerOutcome::failed(err.to_string())
            }
        }
    }

    async fn try_checkout(&self, email: &str) -> Result<(), CheckoutError> {
        let response = self
            .checkout
            .create_checkout(email)
            .await
            .map_err(|err| match err {
                ServiceError::Rejected { .. } => CheckoutError::MissingSessionUrl,
                other => CheckoutError::Network(other.to_string()),
            })?;

        let url = response
            .session_url
            .filter(|url| !url.is_empty())
            .ok_or(CheckoutError::MissingSessionUrl)?;

        self.tabs
            .open_tab(&url)
            .await
            .map_err(|e| CheckoutError::OpenFailed(e.message))
    }

    /// Activates `key`. The caller re-renders afterwards.
    pub async fn activate(&self, key: Option<&str>) -> ControllerOutcome {
        let Some(key) = key.filter(|k| !k.is_empty()) else {
            return ControllerOutcome::cancelled("No license key entered");
        };

        match self.entitlements.activate_license(key).await {
            OperationResult::Success(activation) => {
                ControllerOutcome::completed(activation.message)
            }
            OperationResult::Failure(err) => ControllerOutcome::failed(err.message),
        }
    }

    pub async fn backup(&self, destination: &Path) -> ControllerOutcome {
        if let Err(denied) = self.require_pro(AccountAction::Backup) {
            return denied;
        }

        match self.backups.create_backup(destination).await {
            OperationResult::Success(created) => {
                ControllerOutcome::completed(created.user_message())
            }
            OperationResult::Failure(err) => {
                ControllerOutcome::failed(format!("Backup failed: {}", err.message))
            }
        }
    }

    /// Validates `file` and asks the user to confirm the restore.
    pub async fn preview_restore(&self, file: &Path) -> ControllerOutcome {
        if let Err(denied) = self.require_pro(AccountAction::Restore) {
            return denied;
        }

        match self.backups.preview_backup(file).await {
            OperationResult::Success(preview) => ControllerOutcome::NeedsConfirmation {
                message: restore_confirmation_message(&preview),
            },
            OperationResult::Failure(err) => ControllerOutcome::failed(err.message),
        }
    }

    /// Restores `file` once the user has confirmed the preview.
    pub async fn restore<F>(
        &self,
        file: &Path,
        confirmed: bool,
        on_progress: F,
    ) -> ControllerOutcome
    where
        F: FnMut(&str) + Send,
    {
        if let Err(denied) = self.require_pro(AccountAction::Restore) {
            return denied;
        }
        if !confirmed {
            return ControllerOutcome::cancelled("Restore cancelled");
        }

        match self.backups.restore_backup(file, on_progress).await {
            OperationResult::Success(_) => ControllerOutcome::completed(RESTORE_SUCCESS_MESSAGE),
            OperationResult::Failure(err) => {
                ControllerOutcome::failed(format!("Restore failed: {}", err.message))
            }
        }
    }

    /// Deletes all data, the linked session and the license.
    ///
    /// `acknowledged` is the answer to the warning, `typed` the text entered
    /// at the second prompt. Anything short of both steps leaves all data
    /// intact.
    pub async fn delete_all_data(
        &self,
        acknowledged: bool,
        typed: Option<&str>,
    ) -> ControllerOutcome {
        if let Err(denied) = self.require_pro(AccountAction::DeleteAllData) {
            return denied;
        }

        let authorization = match authorize_deletion(acknowledged, typed) {
            ConfirmationDecision::Authorized(authorization) => authorization,
            decision => {
                tracing::info!(decision = ?decision, "Deletion not confirmed");
                return ControllerOutcome::cancelled(decision.user_message());
            }
        };

        if let OperationResult::Failure(err) =
            self.backups.clear_all_data(authorization, false).await
        {
            return ControllerOutcome::failed(format!("Delete failed: {}", err.message));
        }

        if let Err(err) = self.linked_session.clear_session().await {
            tracing::warn!(error = %err, "Failed to clear linked session");
        }

        self.entitlements.deactivate_license().await;

        tracing::warn!("All data and license removed");
        ControllerOutcome::completed(DELETE_SUCCESS_MESSAGE)
    }
}
