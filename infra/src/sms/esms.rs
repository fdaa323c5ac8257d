//! eSMS delivery gateway
//!
//! Posts a branded one-time message to the eSMS JSON API. A 2xx response
//! body is handed back to the caller unchanged; transport failures and
//! non-2xx statuses become `DeliveryError`s. There is no retry.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, warn};

use rb_core::errors::DeliveryError;
use rb_core::services::{DeliveryGateway, ProviderResponse};
use rb_shared::config::SmsConfig;
use rb_shared::phone::mask_phone_number;

use crate::InfrastructureError;

/// `CodeResult` eSMS reports for an accepted message
pub const ESMS_SUCCESS_CODE: &str = "100";

/// Request body of the `SendMultipleMessage_V4_post_json` call
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct EsmsRequest<'a> {
    api_key: &'a str,
    content: String,
    phone: &'a str,
    secret_key: &'a str,
    brandname: &'a str,
    sms_type: &'a str,
}

/// eSMS gateway implementation
pub struct EsmsGateway {
    client: reqwest::Client,
    config: SmsConfig,
}

impl EsmsGateway {
    /// Create a gateway from explicit credentials and settings
    pub fn new(config: SmsConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.is_empty() || config.secret_key.is_empty() {
            return Err(InfrastructureError::Config(
                "eSMS API key and secret key are required".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "eSMS gateway initialized with brand name {} at {}",
            config.brand_name, config.endpoint
        );

        Ok(Self { client, config })
    }

    fn build_request<'a>(&'a self, phone: &'a str, code: &str) -> EsmsRequest<'a> {
        EsmsRequest {
            api_key: &self.config.api_key,
            content: self.config.render_message(code),
            phone,
            secret_key: &self.config.secret_key,
            brandname: &self.config.brand_name,
            sms_type: &self.config.sms_type,
        }
    }

    /// Reject a 2xx body whose `CodeResult` is not the success code
    fn check_result_code(payload: &Value) -> Result<(), DeliveryError> {
        let code = match payload.get("CodeResult") {
            Some(Value::String(code)) => code.clone(),
            Some(Value::Null) | None => return Ok(()),
            Some(other) => other.to_string(),
        };

        if code == ESMS_SUCCESS_CODE {
            return Ok(());
        }

        let message = payload
            .get("ErrorMessage")
            .and_then(Value::as_str)
            .unwrap_or("unknown provider error")
            .to_string();
        Err(DeliveryError::Rejected { code, message })
    }
}

#[async_trait]
impl DeliveryGateway for EsmsGateway {
    async fn send_code(&self, phone: &str, code: &str) -> Result<ProviderResponse, DeliveryError> {
        let masked_phone = mask_phone_number(phone);
        let body = self.build_request(phone, code);

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(phone = %masked_phone, "eSMS request failed: {}", e);
                if e.is_timeout() {
                    DeliveryError::Timeout(self.config.request_timeout_secs * 1000)
                } else {
                    DeliveryError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                phone = %masked_phone,
                status = status.as_u16(),
                "eSMS returned a non-success status"
            );
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await.map_err(|e| {
            DeliveryError::Transport(format!("Invalid eSMS response body: {}", e))
        })?;

        if self.config.strict_result_code {
            Self::check_result_code(&payload)?;
        }

        info!(
            target: "sms_service",
            provider = "esms",
            phone = %masked_phone,
            code_result = ?payload.get("CodeResult"),
            "SMS submitted to eSMS"
        );

        Ok(payload)
    }

    fn provider_name(&self) -> &str {
        "esms"
    }
}
