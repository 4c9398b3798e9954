//! Linked session adapter for hosts with no third-party login.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::LinkedSession;

/// Nothing is linked, so clearing always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLinkedSession;

#[async_trait]
impl LinkedSession for NoLinkedSession {
    async fn clear_session(&self) -> Result<(), DomainError> {
        tracing::debug!("No linked session to clear");
        Ok(())
    }
}
