//! License service HTTP client.
//!
//! Talks JSON over HTTPS to the SkyPost license backend.
//!
//! # Endpoints
//!
//! - `POST {base}/licenses/verify` with `{"licenseKey": "..."}`
//! - `POST {base}/subscriptions/create-checkout` with `{"userEmail": "..."}`
//!
//! # Configuration
//!
//! ```ignore
//! let config = LicenseApiConfig::default()
//!     .with_base_url("https://skypost-license-backend.onrender.com/api")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let client = LicenseApiClient::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::ports::{
    CheckoutProvider, CheckoutSessionResponse, LicenseVerifier, ServiceError,
    VerifyLicenseResponse,
};

/// Production license backend.
pub const DEFAULT_LICENSE_API_URL: &str = "https://skypost-license-backend.onrender.com/api";

/// Configuration for the license service client.
#[derive(Debug, Clone)]
pub struct LicenseApiConfig {
    /// Base URL, without a trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for LicenseApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LICENSE_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl LicenseApiConfig {
    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyLicenseRequest<'a> {
    license_key: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateCheckoutRequest<'a> {
    user_email: &'a str,
}

/// HTTP implementation of the license service ports.
pub struct LicenseApiClient {
    config: LicenseApiConfig,
    client: Client,
}

impl LicenseApiClient {
    /// Creates a client with the given configuration.
    pub fn new(config: LicenseApiConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = Self::handle_response_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ServiceError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ServiceError {
        if e.is_timeout() {
            ServiceError::Timeout(self.config.timeout.as_secs())
        } else if e.is_connect() {
            ServiceError::Network(format!("Connection failed: {}", e))
        } else {
            ServiceError::Network(e.to_string())
        }
    }

    /// Turns a non-success status into `ServiceError::Rejected`.
    async fn handle_response_status(response: Response) -> Result<Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ServiceError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl LicenseVerifier for LicenseApiClient {
    async fn verify(&self, license_key: &str) -> Result<VerifyLicenseResponse, ServiceError> {
        tracing::debug!(endpoint = "licenses/verify", "Verifying license key");
        self.post_json("licenses/verify", &VerifyLicenseRequest { license_key })
            .await
    }
}

#[async_trait]
impl CheckoutProvider for LicenseApiClient {
    async fn create_checkout(
        &self,
        user_email: &str,
    ) -> Result<CheckoutSessionResponse, ServiceError> {
        tracing::debug!(endpoint = "subscriptions/create-checkout", "Creating checkout session");
        self.post_json(
            "subscriptions/create-checkout",
            &CreateCheckoutRequest { user_email },
        )
        .await
    }
}
