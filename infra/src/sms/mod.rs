//! SMS delivery gateways
//!
//! - **eSMS**: production delivery over the eSMS JSON API
//! - **Mock**: logs instead of sending, for development
//!
//! Phone numbers are masked in every log line.

use std::sync::Arc;

use rb_core::services::DeliveryGateway;
use rb_shared::config::{SmsConfig, SmsProvider};

use crate::InfrastructureError;

pub mod esms;
pub mod mock_sms;

pub use esms::EsmsGateway;
pub use mock_sms::MockSmsGateway;


/// Create the delivery gateway selected by `config.provider`
pub fn create_delivery_gateway(
    config: &SmsConfig,
) -> Result<Arc<dyn DeliveryGateway>, InfrastructureError> {
    let gateway: Arc<dyn DeliveryGateway> = match config.provider {
        SmsProvider::Mock => {
            tracing::warn!("Using mock SMS gateway; no messages will be delivered");
            Arc::new(MockSmsGateway::new(config.product_name.clone()))
        }
        SmsProvider::Esms => Arc::new(EsmsGateway::new(config.clone())?),
    };

    Ok(gateway)
}
