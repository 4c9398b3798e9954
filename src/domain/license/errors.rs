//! License and checkout errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Failures of license loading, activation and deactivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LicenseError {
    /// The key was rejected or the service response could not be trusted.
    #[error("{0}")]
    Verification(String),

    /// The license service could not be reached.
    #[error("Could not reach the license service: {0}")]
    Network(String),

    /// The persistent store failed.
    #[error("Could not save license data: {0}")]
    Storage(String),
}

impl LicenseError {
    pub fn verification(message: impl Into<String>) -> Self {
        LicenseError::Verification(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LicenseError::Verification(_) => ErrorCode::VerificationFailed,
            LicenseError::Network(_) => ErrorCode::NetworkError,
            LicenseError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

impl From<ValidationError> for LicenseError {
    fn from(err: ValidationError) -> Self {
        LicenseError::Verification(err.to_string())
    }
}

impl From<LicenseError> for DomainError {
    fn from(err: LicenseError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Failures of the "get Pro" checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The service answered but did not return a session URL.
    #[error("Failed to create checkout session")]
    MissingSessionUrl,

    /// The request failed before a usable answer arrived.
    #[error("Checkout error: {0}")]
    Network(String),

    /// The checkout page could not be opened.
    #[error("Could not open checkout page: {0}")]
    OpenFailed(String),
}

impl CheckoutError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CheckoutError::MissingSessionUrl => ErrorCode::InternalError,
            CheckoutError::Network(_) => ErrorCode::NetworkError,
            CheckoutError::OpenFailed(_) => ErrorCode::InternalError,
        }
    }
}

impl From<CheckoutError> for DomainError {
    fn from(err: CheckoutError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
