//! Tab opener for hosts without a browser.
//!
//! Logs the URL and keeps a record of everything opened so the CLI can
//! print it and tests can assert on it.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::foundation::DomainError;
use crate::ports::TabOpener;

#[derive(Debug, Clone, Default)]
pub struct LoggingTabOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

impl LoggingTabOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs opened so far, oldest first.
    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TabOpener for LoggingTabOpener {
    async fn open_tab(&self, url: &str) -> Result<(), DomainError> {
        tracing::info!(url = %url, "Opening tab");
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
        Ok(())
    }
}
