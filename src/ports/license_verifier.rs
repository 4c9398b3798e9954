//! License service ports.
//!
//! The license service verifies keys and creates checkout sessions. Both
//! operations are behind traits so the managers can be tested with mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Transport-level failures talking to the license service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The service answered with a non-success HTTP status.
    #[error("Service rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Invalid response from service: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// True when the service explicitly refused the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ServiceError::Rejected { .. })
    }
}

/// License details returned by a successful verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseDetails {
    /// RFC 3339 expiry, if the service sets one.
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Body of the verify endpoint's response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyLicenseResponse {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub license: Option<LicenseDetails>,
    #[serde(default)]
    pub error: Option<String>,
}

impl VerifyLicenseResponse {
    /// A valid response with the given expiry.
    pub fn valid(expires_at: Option<String>) -> Self {
        Self {
            valid: true,
            license: Some(LicenseDetails { expires_at }),
            error: None,
        }
    }

    /// An invalid response with an optional reason.
    pub fn invalid(error: Option<String>) -> Self {
        Self {
            valid: false,
            license: None,
            error,
        }
    }

    /// The expiry the service sent. A blank value counts as none.
    pub fn expires_at(&self) -> Option<&str> {
        self.license
            .as_ref()
            .and_then(|l| l.expires_at.as_deref())
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
    }
}

/// Port for license key verification.
#[async_trait]
pub trait LicenseVerifier: Send + Sync {
    /// Ask the service whether `license_key` is valid.
    async fn verify(&self, license_key: &str) -> Result<VerifyLicenseResponse, ServiceError>;
}
