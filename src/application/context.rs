//! AppContext - Wires the managers and the controller over injected ports.
//!
//! Replaces process-wide singletons: build one context at startup and share
//! it. `initialize` loads the license before returning, so gating answers
//! from a fresh context are already correct.

use std::sync::Arc;

use crate::application::backup::BackupManager;
use crate::application::controller::ProController;
use crate::application::entitlement::EntitlementManager;
use crate::domain::license::LicenseError;
use crate::ports::{CheckoutProvider, KeyValueStore, LicenseVerifier, LinkedSession, TabOpener};

/// External dependencies of the application.
#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<dyn KeyValueStore>,
    pub verifier: Arc<dyn LicenseVerifier>,
    pub checkout: Arc<dyn CheckoutProvider>,
    pub tabs: Arc<dyn TabOpener>,
    pub linked_session: Arc<dyn LinkedSession>,
}

pub struct AppContext {
    entitlements: Arc<EntitlementManager>,
    backups: Arc<BackupManager>,
    controller: ProController,
}

impl AppContext {
    /// Builds the context and loads the persisted license.
    pub async fn initialize(services: AppServices) -> Result<Self, LicenseError> {
        let entitlements = Arc::new(
            EntitlementManager::load(services.store.clone(), services.verifier).await?,
        );
        let backups = Arc::new(BackupManager::new(services.store));
        let controller = ProController::new(
            entitlements.clone(),
            backups.clone(),
            services.checkout,
            services.tabs,
            services.linked_session,
        );

        tracing::debug!(tier = %entitlements.status().tier, "Application context ready");

        Ok(Self {
            entitlements,
            backups,
            controller,
        })
    }

    pub fn entitlements(&self) -> &EntitlementManager {
        &self.entitlements
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    pub fn controller(&self) -> &ProController {
        &self.controller
    }
}
