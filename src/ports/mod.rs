//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `KeyValueStore` - Persistent storage for notes, settings and the license
//! - `LicenseVerifier` - License key verification
//! - `CheckoutProvider` - Checkout sessions for buying Pro
//! - `TabOpener` / `LinkedSession` - Browser integration

mod browser;
mod checkout_provider;
mod key_value_store;
mod license_verifier;

pub use browser::{LinkedSession, TabOpener};
pub use checkout_provider::{CheckoutProvider, CheckoutSessionResponse};
pub use key_value_store::{KeyValueStore, StoreEntries, StoreError};
pub use license_verifier::{LicenseDetails, LicenseVerifier, ServiceError, VerifyLicenseResponse};
