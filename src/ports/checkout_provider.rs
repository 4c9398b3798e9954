//! Checkout provider port.
//!
//! Creates a hosted payment page for buying a Pro subscription.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ServiceError;

/// Body of the create-checkout response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    /// URL of the hosted checkout page.
    #[serde(default)]
    pub session_url: Option<String>,
}

/// Port for creating checkout sessions.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a checkout session for `user_email`.
    async fn create_checkout(
        &self,
        user_email: &str,
    ) -> Result<CheckoutSessionResponse, ServiceError>;
}
