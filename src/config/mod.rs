//! Typed settings for the CLI shell.
//!
//! Everything comes from `SKYPOST_PRO__SECTION__KEY` environment variables,
//! optionally seeded from a `.env` file. Every field has a default, so an
//! empty environment is a working setup pointed at the production service.
//!
//! ```no_run
//! use skypost_pro::config::AppConfig;
//!
//! let config = AppConfig::load().expect("settings");
//! config.validate().expect("usable settings");
//! println!("License service at {}", config.service.base_url);
//! ```

mod error;
mod runtime;
mod service;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use runtime::{Environment, RuntimeConfig};
pub use service::ServiceConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// All settings, grouped by concern.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Environment name and log filter
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Where the license service lives and how long to wait for it
    #[serde(default)]
    pub service: ServiceConfig,

    /// Location of the data file
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Reads `.env` if present, then the `SKYPOST_PRO` environment.
    ///
    /// `SKYPOST_PRO__SERVICE__BASE_URL=http://localhost:3000/api` sets
    /// `service.base_url`. Fails only when a value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SKYPOST_PRO")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    /// Checks values that parse but cannot work: a bad or non-https (in
    /// production) service URL, an out-of-range timeout, an empty data path.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.service.validate(&self.runtime.environment)?;
        self.storage.validate()
    }

    pub fn is_production(&self) -> bool {
        self.runtime.is_production()
    }
}
