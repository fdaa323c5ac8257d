//! Configuration for the issuance service

use chrono::Duration;
use rb_shared::config::otp::{OtpConfig, MAX_TTL_SECONDS};

/// Configuration for the issuance service
#[derive(Debug, Clone)]
pub struct IssuanceConfig {
    /// Lifetime of a server-generated code
    pub code_ttl: Duration,
    /// Caller-facing timeout wrapped around the gateway call
    pub delivery_timeout: Option<std::time::Duration>,
}

impl Default for IssuanceConfig {
    fn default() -> Self {
        Self {
            code_ttl: Duration::minutes(5),
            delivery_timeout: None,
        }
    }
}

impl From<&OtpConfig> for IssuanceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_ttl: Duration::seconds(config.ttl_seconds.min(MAX_TTL_SECONDS)),
            delivery_timeout: config
                .delivery_timeout_ms
                .map(std::time::Duration::from_millis),
        }
    }
}
