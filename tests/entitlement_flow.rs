//! End-to-end license lifecycle through a fully wired `AppContext`.

use std::sync::Arc;

use chrono::Duration;
use serde_json::json;

use skypost_pro::adapters::{
    InMemoryKeyValueStore, LoggingTabOpener, MockLicenseService, NoLinkedSession,
};
use skypost_pro::application::controller::ControllerOutcome;
use skypost_pro::application::{AppContext, AppServices};
use skypost_pro::domain::foundation::Timestamp;
use skypost_pro::domain::license::{LicenseTier, RETIRED_TEST_KEY};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    store: InMemoryKeyValueStore,
    service: MockLicenseService,
    tabs: LoggingTabOpener,
    context: AppContext,
}

async fn harness_with(store: InMemoryKeyValueStore) -> Harness {
    let service = MockLicenseService::new();
    let tabs = LoggingTabOpener::new();
    let services = AppServices {
        store: Arc::new(store.clone()),
        verifier: Arc::new(service.clone()),
        checkout: Arc::new(service.clone()),
        tabs: Arc::new(tabs.clone()),
        linked_session: Arc::new(NoLinkedSession),
    };
    let context = AppContext::initialize(services)
        .await
        .expect("context should initialize");

    Harness {
        store,
        service,
        tabs,
        context,
    }
}

async fn harness() -> Harness {
    harness_with(InMemoryKeyValueStore::new()).await
}

fn rfc3339_in_days(days: i64) -> String {
    Timestamp::now().plus_days(days).to_rfc3339()
}

// =============================================================================
// Activation
// =============================================================================

#[tokio::test]
async fn fresh_install_is_free() {
    let h = harness().await;
    let entitlements = h.context.entitlements();

    assert!(!entitlements.is_pro_user());
    assert_eq!(entitlements.get_remaining_days(), 0);
    assert!(entitlements.can_use_feature("basic_notes"));
    assert!(!entitlements.can_use_feature("analytics"));
}

#[tokio::test]
async fn activation_with_service_expiry_grants_pro() {
    let h = harness().await;
    h.service.accept_key("GOOD-KEY", Some(&rfc3339_in_days(30)));

    let result = h.context.entitlements().activate_license("GOOD-KEY").await;

    assert!(result.is_success());
    let entitlements = h.context.entitlements();
    assert!(entitlements.is_pro_user());
    let days = entitlements.get_remaining_days();
    assert!((30..=31).contains(&days), "unexpected remaining days {}", days);
    assert!(entitlements.can_use_feature("analytics"));
    assert!(entitlements.can_use_feature("advancedPreviews"));

    let stored = h.store.snapshot().await;
    assert_eq!(stored.get("proLicenseKey"), Some(&json!("GOOD-KEY")));
    assert!(stored.contains_key("proLicenseExpiry"));
}

#[tokio::test]
async fn activation_without_expiry_defaults_to_one_year() {
    let h = harness().await;
    h.service.accept_key("GOOD-KEY", None);

    let before = Timestamp::now();
    let activation = h
        .context
        .entitlements()
        .activate_license("GOOD-KEY")
        .await
        .into_value()
        .expect("activation should succeed");

    assert!(activation.defaulted_expiry);
    let expected = before.plus_days(365);
    let drift = activation.expires_at.duration_since(&expected);
    assert!(drift >= Duration::zero() && drift < Duration::seconds(1));
    assert_eq!(h.context.entitlements().get_remaining_days(), 365);
}

#[tokio::test]
async fn activation_trims_the_key_before_verifying() {
    let h = harness().await;
    h.service.accept_key("GOOD-KEY", None);

    let result = h
        .context
        .entitlements()
        .activate_license("  GOOD-KEY\n")
        .await;

    assert!(result.is_success());
    let calls = h.service.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args, vec!["GOOD-KEY".to_string()]);
}

#[tokio::test]
async fn invalid_key_leaves_existing_license_untouched() {
    let h = harness().await;
    h.service.accept_key("GOOD-KEY", Some(&rfc3339_in_days(10)));
    h.service.reject_key("BAD-KEY", Some("License revoked"));
    assert!(h
        .context
        .entitlements()
        .activate_license("GOOD-KEY")
        .await
        .is_success());
    let before = h.store.snapshot().await;

    let result = h.context.entitlements().activate_license("BAD-KEY").await;

    assert!(!result.is_success());
    assert_eq!(result.error(), Some("License revoked"));
    assert!(h.context.entitlements().is_pro_user());
    assert_eq!(h.store.snapshot().await, before);
}

#[tokio::test]
async fn unknown_key_reports_invalid_license() {
    let h = harness().await;

    let result = h.context.entitlements().activate_license("NOPE").await;

    let message = result.error().unwrap_or_default();
    assert!(!message.is_empty());
    assert_eq!(message, "Invalid license key");
    assert!(!h.context.entitlements().is_pro_user());
    assert!(h.store.snapshot().await.is_empty());
}

#[tokio::test]
async fn empty_key_never_reaches_the_service() {
    let h = harness().await;

    let result = h.context.entitlements().activate_license("   ").await;

    assert_eq!(result.error(), Some("Please enter a license key"));
    assert_eq!(h.service.call_count("verify"), 0);
}

// =============================================================================
// Loading
// =============================================================================

#[tokio::test]
async fn persisted_license_survives_a_restart() {
    let store = InMemoryKeyValueStore::new();
    {
        let h = harness_with(store.clone()).await;
        h.service.accept_key("GOOD-KEY", Some(&rfc3339_in_days(5)));
        assert!(h
            .context
            .entitlements()
            .activate_license("GOOD-KEY")
            .await
            .is_success());
    }

    let restarted = harness_with(store).await;

    let status = restarted.context.entitlements().status();
    assert_eq!(status.tier, LicenseTier::Pro);
    assert!((5..=6).contains(&status.remaining_days));
}

#[tokio::test]
async fn expired_license_loads_as_free() {
    let store = InMemoryKeyValueStore::with_entries(
        [
            ("proLicenseKey".to_string(), json!("OLD-KEY")),
            ("proLicenseExpiry".to_string(), json!(rfc3339_in_days(-1))),
        ]
        .into_iter()
        .collect(),
    );

    let h = harness_with(store).await;

    assert!(!h.context.entitlements().is_pro_user());
    assert_eq!(h.context.entitlements().get_remaining_days(), 0);
}

#[tokio::test]
async fn retired_test_key_is_purged_on_load() {
    let store = InMemoryKeyValueStore::with_entries(
        [
            ("proLicenseKey".to_string(), json!(RETIRED_TEST_KEY)),
            ("proLicenseExpiry".to_string(), json!(rfc3339_in_days(1000))),
            ("theme".to_string(), json!("dark")),
        ]
        .into_iter()
        .collect(),
    );

    let h = harness_with(store).await;

    assert!(!h.context.entitlements().is_pro_user());
    let stored = h.store.snapshot().await;
    assert!(!stored.contains_key("proLicenseKey"));
    assert!(!stored.contains_key("proLicenseExpiry"));
    assert_eq!(stored.get("theme"), Some(&json!("dark")));
}

// =============================================================================
// Deactivation and the controller
// =============================================================================

#[tokio::test]
async fn deactivate_is_idempotent() {
    let h = harness().await;
    h.service.accept_key("GOOD-KEY", None);
    assert!(h
        .context
        .entitlements()
        .activate_license("GOOD-KEY")
        .await
        .is_success());

    h.context.entitlements().deactivate_license().await;
    h.context.entitlements().deactivate_license().await;

    assert!(!h.context.entitlements().is_pro_user());
    assert!(h.store.snapshot().await.is_empty());
}

#[tokio::test]
async fn panel_switches_to_license_info_after_activation() {
    let h = harness().await;
    h.service.accept_key("GOOD-KEY", None);

    let free_panel = h.context.controller().render();
    assert!(free_panel.upgrade_offer.is_some());
    assert!(free_panel.account_actions.is_empty());

    let outcome = h.context.controller().activate(Some("GOOD-KEY")).await;
    assert!(outcome.is_completed());

    let pro_panel = h.context.controller().render();
    assert!(pro_panel.upgrade_offer.is_none());
    assert_eq!(pro_panel.account_actions.len(), 3);
}

#[tokio::test]
async fn checkout_opens_session_url() {
    let h = harness().await;
    h.service
        .set_checkout_url(Some("https://checkout.example.com/session/1"));

    let outcome = h
        .context
        .controller()
        .start_checkout(Some("user@example.com"))
        .await;

    assert!(outcome.is_completed());
    assert_eq!(
        h.tabs.opened(),
        vec!["https://checkout.example.com/session/1".to_string()]
    );
}

#[tokio::test]
async fn checkout_without_session_url_fails() {
    let h = harness().await;
    h.service.set_checkout_url(None);

    let outcome = h
        .context
        .controller()
        .start_checkout(Some("user@example.com"))
        .await;

    assert!(matches!(outcome, ControllerOutcome::Failed { .. }));
    assert_eq!(outcome.message(), "Failed to create checkout session");
    assert!(h.tabs.opened().is_empty());
}
