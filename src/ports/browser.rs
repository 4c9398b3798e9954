//! Browser-side ports used by the Pro controller.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Opens a URL for the user, e.g. in a new browser tab.
#[async_trait]
pub trait TabOpener: Send + Sync {
    async fn open_tab(&self, url: &str) -> Result<(), DomainError>;
}

/// A third-party session linked to the account (the Bluesky login).
///
/// Cleared as part of deleting all data.
#[async_trait]
pub trait LinkedSession: Send + Sync {
    async fn clear_session(&self) -> Result<(), DomainError>;
}
