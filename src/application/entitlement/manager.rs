//! EntitlementManager - Owns the license record and answers "is this user Pro?".
//!
//! The record is mirrored in memory so gating queries stay synchronous.
//! `load_license` fills the mirror from the store and must be awaited before
//! gating answers can be trusted.

use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::application::OperationResult;
use crate::domain::foundation::Timestamp;
use crate::domain::license::{
    is_feature_available, AccessDeniedReason, AccessResult, FeatureTable, LicenseError,
    LicenseKey, LicenseRecord, LicenseTier, DEFAULT_LICENSE_TERM_DAYS, LICENSE_FIELDS,
};
use crate::ports::{KeyValueStore, LicenseVerifier, ServiceError, StoreError};

/// Message returned by a successful activation.
pub const ACTIVATION_SUCCESS_MESSAGE: &str = "License activated!";

/// Result of a successful activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    pub message: String,
    pub expires_at: Timestamp,
    /// True when the service gave no expiry and the default term was applied.
    pub defaulted_expiry: bool,
}

/// Snapshot of the license for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseStatus {
    pub tier: LicenseTier,
    pub remaining_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_hint: Option<String>,
}

/// Single source of truth for the user's entitlement.
pub struct EntitlementManager {
    store: Arc<dyn KeyValueStore>,
    verifier: Arc<dyn LicenseVerifier>,
    record: RwLock<LicenseRecord>,
}

fn storage_error(err: StoreError) -> LicenseError {
    LicenseError::Storage(err.to_string())
}

impl EntitlementManager {
    /// Creates a manager with an empty (Free) mirror. Call `load_license` next.
    pub fn new(store: Arc<dyn KeyValueStore>, verifier: Arc<dyn LicenseVerifier>) -> Self {
        Self {
            store,
            verifier,
            record: RwLock::new(LicenseRecord::empty()),
        }
    }

    /// Creates a manager and loads the persisted license.
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        verifier: Arc<dyn LicenseVerifier>,
    ) -> Result<Self, LicenseError> {
        let manager = Self::new(store, verifier);
        manager.load_license().await?;
        Ok(manager)
    }

    fn current(&self) -> RwLockReadGuard<'_, LicenseRecord> {
        self.record.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(&self, record: LicenseRecord) {
        *self.record.write().unwrap_or_else(PoisonError::into_inner) = record;
    }

    /// Reads the license from the store into memory.
    ///
    /// A stored retired test key is removed from the store and treated as no
    /// license at all.
    pub async fn load_license(&self) -> Result<(), LicenseError> {
        let values = self
            .store
            .get(&LICENSE_FIELDS)
            .await
            .map_err(storage_error)?;
        let record = LicenseRecord::from_stored(&values);

        if record.key().is_some_and(LicenseKey::is_retired_test_key) {
            self.store
                .remove(&LICENSE_FIELDS)
                .await
                .map_err(storage_error)?;
            self.replace(LicenseRecord::empty());
            tracing::info!("Removed retired test license from storage");
            return Ok(());
        }

        tracing::debug!(
            has_key = record.key().is_some(),
            has_expiry = record.expiry().is_some(),
            "Loaded license record"
        );
        self.replace(record);
        Ok(())
    }

    /// Re-reads the license from the store.
    pub async fn reload(&self) -> Result<(), LicenseError> {
        self.load_license().await
    }

    pub fn is_pro_user(&self) -> bool {
        self.is_pro_user_at(Timestamp::now())
    }

    pub fn is_pro_user_at(&self, now: Timestamp) -> bool {
        self.current().is_active_at(now)
    }

    /// Whole days until expiry, rounded up. Zero for Free users.
    pub fn get_remaining_days(&self) -> u32 {
        self.current().remaining_days_at(Timestamp::now())
    }

    pub fn status(&self) -> LicenseStatus {
        let now = Timestamp::now();
        let record = self.current();
        LicenseStatus {
            tier: record.tier_at(now),
            remaining_days: record.remaining_days_at(now),
            expires_at: record.expiry(),
            key_hint: record.key().map(LicenseKey::masked),
        }
    }

    /// Verifies `license_key` with the license service and stores it.
    ///
    /// On failure the previous license is left untouched.
    pub async fn activate_license(&self, license_key: &str) -> OperationResult<Activation> {
        match self.try_activate(license_key).await {
            Ok(activation) => OperationResult::Success(activation),
            Err(err) => {
                tracing::warn!(error = %err, code = %err.code(), "License activation failed");
                OperationResult::failure(err)
            }
        }
    }

    async fn try_activate(&self, raw: &str) -> Result<Activation, LicenseError> {
        let key = LicenseKey::parse(raw)
            .map_err(|_| LicenseError::verification("Please enter a license key"))?;

        tracing::info!(key = %key.masked(), "Activating license");

        let response = self
            .verifier
            .verify(key.expose())
            .await
            .map_err(|err| match err {
                ServiceError::Rejected { status, .. } => {
                    tracing::debug!(status, "License service rejected key");
                    LicenseError::verification("Invalid license key")
                }
                ServiceError::Network(_) | ServiceError::Timeout(_) => {
                    LicenseError::Network(err.to_string())
                }
                ServiceError::InvalidResponse(reason) => LicenseError::verification(format!(
                    "Unexpected response from license service: {}",
                    reason
                )),
            })?;

        if !response.valid {
            let reason = response
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "License verification failed".to_string());
            return Err(LicenseError::Verification(reason));
        }

        let (expires_at, defaulted_expiry) = match response.expires_at() {
            Some(raw_expiry) => {
                let expiry = Timestamp::parse_rfc3339("expiresAt", raw_expiry).map_err(|e| {
                    LicenseError::verification(format!(
                        "License service returned an invalid expiry: {}",
                        e
                    ))
                })?;
                (expiry, false)
            }
            None => {
                tracing::info!(
                    days = DEFAULT_LICENSE_TERM_DAYS,
                    "License service returned no expiry, applying default term"
                );
                (Timestamp::now().plus_days(DEFAULT_LICENSE_TERM_DAYS), true)
            }
        };

        let record = LicenseRecord::new(key, expires_at);
        self.store
            .set(record.to_stored())
            .await
            .map_err(storage_error)?;
        self.replace(record);

        tracing::info!(expires_at = %expires_at, "License activated");

        Ok(Activation {
            message: ACTIVATION_SUCCESS_MESSAGE.to_string(),
            expires_at,
            defaulted_expiry,
        })
    }

    /// Removes the license. Always succeeds; a store failure is logged and
    /// the in-memory record is cleared regardless.
    pub async fn deactivate_license(&self) {
        if let Err(err) = self.store.remove(&LICENSE_FIELDS).await {
            tracing::warn!(error = %err, "Failed to remove license from storage");
        }
        self.replace(LicenseRecord::empty());
        tracing::info!("License deactivated");
    }

    pub fn get_feature_list(&self) -> &'static FeatureTable {
        FeatureTable::standard()
    }

    /// The gating check for every feature in the product.
    pub fn can_use_feature(&self, feature_id: &str) -> bool {
        is_feature_available(feature_id, self.is_pro_user())
    }

    /// Like `can_use_feature`, with a reason when denied.
    pub fn check_feature(&self, feature_id: &str) -> AccessResult {
        if self.can_use_feature(feature_id) {
            AccessResult::Allowed
        } else {
            AccessResult::Denied(AccessDeniedReason::pro_required(feature_id))
        }
    }
}
