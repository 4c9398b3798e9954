//! Mock license service for testing.
//!
//! Implements both `LicenseVerifier` and `CheckoutProvider` with:
//! - Pre-configured accepted and rejected keys
//! - Error injection
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::ports::{
    CheckoutProvider, CheckoutSessionResponse, LicenseVerifier, ServiceError,
    VerifyLicenseResponse,
};

/// Mock license service for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockLicenseService::new();
/// mock.accept_key("GOOD-KEY", Some("2030-01-01T00:00:00Z"));
/// mock.set_checkout_url(Some("https://checkout.example/session"));
///
/// let response = mock.verify("GOOD-KEY").await?;
/// assert!(response.valid);
/// ```
///
/// Keys that were never configured are answered with HTTP 404.
#[derive(Clone, Default)]
pub struct MockLicenseService {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Configured verification answers by key.
    keys: HashMap<String, VerifyLicenseResponse>,

    /// URL returned by `create_checkout`.
    checkout_url: Option<String>,

    /// Error returned by every call while set.
    error: Option<ServiceError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockLicenseService {
    /// Create a new mock with no keys configured.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answer `key` with `valid: true` and the given expiry.
    pub fn accept_key(&self, key: &str, expires_at: Option<&str>) {
        self.state().keys.insert(
            key.to_string(),
            VerifyLicenseResponse::valid(expires_at.map(str::to_string)),
        );
    }

    /// Answer `key` with `valid: false` and an optional reason.
    pub fn reject_key(&self, key: &str, error: Option<&str>) {
        self.state().keys.insert(
            key.to_string(),
            VerifyLicenseResponse::invalid(error.map(str::to_string)),
        );
    }

    /// Answer `key` with an arbitrary response body.
    pub fn respond_to(&self, key: &str, response: VerifyLicenseResponse) {
        self.state().keys.insert(key.to_string(), response);
    }

    /// URL returned by the next checkout calls. `None` omits `sessionUrl`.
    pub fn set_checkout_url(&self, url: Option<&str>) {
        self.state().checkout_url = url.map(str::to_string);
    }

    /// Fail every call with `error` until cleared.
    pub fn fail_with(&self, error: ServiceError) {
        self.state().error = Some(error);
    }

    pub fn clear_error(&self) {
        self.state().error = None;
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    /// Number of calls made to `method`.
    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    fn record(&self, method: &str, args: Vec<String>) -> Option<ServiceError> {
        let mut state = self.state();
        state.call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
        state.error.clone()
    }
}

#[async_trait]
impl LicenseVerifier for MockLicenseService {
    async fn verify(&self, license_key: &str) -> Result<VerifyLicenseResponse, ServiceError> {
        if let Some(error) = self.record("verify", vec![license_key.to_string()]) {
            return Err(error);
        }

        self.state()
            .keys
            .get(license_key)
            .cloned()
            .ok_or_else(|| ServiceError::Rejected {
                status: 404,
                body: r#"{"error":"License not found"}"#.to_string(),
            })
    }
}

#[async_trait]
impl CheckoutProvider for MockLicenseService {
    async fn create_checkout(
        &self,
        user_email: &str,
    ) -> Result<CheckoutSessionResponse, ServiceError> {
        if let Some(error) = self.record("create_checkout", vec![user_email.to_string()]) {
            return Err(error);
        }

        Ok(CheckoutSessionResponse {
            session_url: self.state().checkout_url.clone(),
        })
    }
}
