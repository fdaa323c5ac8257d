//! Delivery gateway integration trait

use async_trait::async_trait;

use crate::errors::DeliveryError;

/// Raw provider response body, passed through unchanged
pub type ProviderResponse = serde_json::Value;

/// Sends a one-time code to a phone number through an SMS provider
#[async_trait]
pub trait DeliveryGateway: Send + Sync {
    /// Transmit `code` to `phone` and return the provider's parsed response
    async fn send_code(&self, phone: &str, code: &str) -> Result<ProviderResponse, DeliveryError>;

    /// Provider name for logs
    fn provider_name(&self) -> &str;
}
