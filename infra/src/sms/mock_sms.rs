//! Mock SMS gateway
//!
//! Logs messages instead of sending them. Selected with `SMS_PROVIDER=mock`
//! and used by the API tests.

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use rb_core::errors::DeliveryError;
use rb_core::services::{DeliveryGateway, ProviderResponse};
use rb_shared::phone::{is_plausible_phone, mask_phone_number};

/// Mock delivery gateway for development and testing
#[derive(Clone)]
pub struct MockSmsGateway {
    product_name: String,
    message_count: Arc<AtomicU64>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockSmsGateway {
    /// Create a mock gateway rendering messages for `product_name`
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Number of messages accepted so far
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

impl Default for MockSmsGateway {
    fn default() -> Self {
        Self::new("Reelbase")
    }
}

#[async_trait]
impl DeliveryGateway for MockSmsGateway {
    async fn send_code(&self, phone: &str, code: &str) -> Result<ProviderResponse, DeliveryError> {
        let masked_phone = mask_phone_number(phone);

        if !is_plausible_phone(phone) {
            return Err(DeliveryError::Rejected {
                code: "101".to_string(),
                message: format!("Invalid phone number format: {}", masked_phone),
            });
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(phone = %masked_phone, "Mock SMS gateway simulating failure");
            return Err(DeliveryError::Transport(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        debug!(
            target: "sms_service",
            content = %format!("{} is your verification code for {}", code, self.product_name),
            "Mock SMS content"
        );
        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked_phone,
            message_id = %message_id,
            count = count,
            "SMS sent successfully (mock)"
        );

        Ok(json!({
            "CodeResult": "100",
            "SMSID": message_id,
        }))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
