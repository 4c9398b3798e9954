//! License service configuration

use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::Environment;

/// License backend endpoint settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the license API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate service configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("service.base_url"));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| ValidationError::InvalidServiceUrl(e.to_string()))?;
        match url.scheme() {
            "https" => {}
            "http" if *environment != Environment::Production => {}
            "http" => return Err(ValidationError::ServiceUrlMustBeHttps),
            other => {
                return Err(ValidationError::InvalidServiceUrl(format!(
                    "unsupported scheme '{}'",
                    other
                )))
            }
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://skypost-license-backend.onrender.com/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
