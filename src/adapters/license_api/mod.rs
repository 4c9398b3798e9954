//! License service adapters.
//!
//! - `LicenseApiClient` - HTTP client for the SkyPost license backend
//! - `MockLicenseService` - Configurable mock for tests

mod http_client;
mod mock_license_service;

pub use http_client::{LicenseApiClient, LicenseApiConfig, DEFAULT_LICENSE_API_URL};
pub use mock_license_service::{MethodCall, MockLicenseService};
