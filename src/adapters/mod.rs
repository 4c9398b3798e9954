//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Key-value stores (in-memory, JSON file)
//! - `license_api` - License service client and mock
//! - `browser` - Tab opening and linked-session stand-ins

pub mod browser;
pub mod license_api;
pub mod storage;

pub use browser::{LoggingTabOpener, NoLinkedSession};
pub use license_api::{LicenseApiClient, LicenseApiConfig, MockLicenseService};
pub use storage::{InMemoryKeyValueStore, JsonFileStore};
