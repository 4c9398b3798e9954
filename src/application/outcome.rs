//! Structured result of a user-initiated operation.
//!
//! Interactive operations never return a bare error. A failure always
//! carries a code and a message the UI can show as-is.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Success with a value, or failure with a user-facing error.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult<T> {
    Success(T),
    Failure(DomainError),
}

impl<T> OperationResult<T> {
    pub fn failure(error: impl Into<DomainError>) -> Self {
        OperationResult::Failure(error.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            OperationResult::Success(value) => Some(value),
            OperationResult::Failure(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            OperationResult::Success(value) => Some(value),
            OperationResult::Failure(_) => None,
        }
    }

    /// The failure message, if this is a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            OperationResult::Success(_) => None,
            OperationResult::Failure(err) => Some(err.message.as_str()),
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            OperationResult::Success(_) => None,
            OperationResult::Failure(err) => Some(err.code),
        }
    }

    pub fn into_result(self) -> Result<T, DomainError> {
        match self {
            OperationResult::Success(value) => Ok(value),
            OperationResult::Failure(err) => Err(err),
        }
    }
}

impl<T, E: Into<DomainError>> From<Result<T, E>> for OperationResult<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => OperationResult::Success(value),
            Err(err) => OperationResult::Failure(err.into()),
        }
    }
}
