//! Main issuance service implementation

use chrono::Utc;
use std::sync::Arc;

use rb_shared::utils::phone::mask_phone_number;

use crate::domain::entities::one_time_code::NewOneTimeCode;
use crate::errors::{
    DeliveryError, DomainError, DomainResult, MISSING_PHONE_OR_CODE, MISSING_USER_OR_PHONE,
    SEND_SUCCEEDED,
};
use crate::repositories::OneTimeCodeRepository;
use crate::services::code_generator::CodeGenerator;
use crate::services::delivery::{DeliveryGateway, ProviderResponse};

use super::config::IssuanceConfig;
use super::types::{DeliveryReceipt, IssuedCode};

/// Orchestrates generate → persist → deliver
pub struct IssuanceService<G, R>
where
    G: DeliveryGateway + ?Sized,
    R: OneTimeCodeRepository + ?Sized,
{
    /// Gateway used to transmit codes
    gateway: Arc<G>,
    /// Store for server-generated codes
    repository: Arc<R>,
    /// Generator for server-generated codes
    generator: Box<dyn CodeGenerator>,
    /// Service configuration
    config: IssuanceConfig,
}

impl<G, R> IssuanceService<G, R>
where
    G: DeliveryGateway + ?Sized,
    R: OneTimeCodeRepository + ?Sized,
{
    /// Create a new issuance service
    pub fn new(
        gateway: Arc<G>,
        repository: Arc<R>,
        generator: Box<dyn CodeGenerator>,
        config: IssuanceConfig,
    ) -> Self {
        Self {
            gateway,
            repository,
            generator,
            config,
        }
    }

    /// Forward a caller-supplied code to `phone`
    ///
    /// Nothing is persisted. Blank inputs count as missing and are rejected
    /// before the gateway is touched.
    ///
    /// # Returns
    ///
    /// * `Ok(DeliveryReceipt)` - Success message plus the provider payload, unchanged
    /// * `Err(DomainError::Validation)` - `phone` or `code` missing
    /// * `Err(DomainError::Delivery)` - The gateway failed
    pub async fn issue(
        &self,
        phone: Option<&str>,
        code: Option<&str>,
    ) -> DomainResult<DeliveryReceipt> {
        let (phone, code) = match (present(phone), present(code)) {
            (Some(phone), Some(code)) => (phone, code),
            _ => {
                tracing::warn!(event = "otp_send_rejected", "Missing phone number or code");
                return Err(DomainError::Validation {
                    message: MISSING_PHONE_OR_CODE.to_string(),
                });
            }
        };

        let data = self.deliver(phone, code).await?;

        Ok(DeliveryReceipt {
            message: SEND_SUCCEEDED.to_string(),
            data,
        })
    }

    /// Generate, persist and deliver a fresh code for `user_id`
    ///
    /// Any code still active for the user is invalidated by the store. If
    /// delivery fails the new code is invalidated too, so a code that never
    /// reached the user cannot be verified.
    pub async fn issue_generated(
        &self,
        user_id: Option<&str>,
        phone: Option<&str>,
    ) -> DomainResult<IssuedCode> {
        let (user_id, phone) = match (present(user_id), present(phone)) {
            (Some(user_id), Some(phone)) => (user_id, phone),
            _ => {
                tracing::warn!(event = "otp_issue_rejected", "Missing user id or phone number");
                return Err(DomainError::Validation {
                    message: MISSING_USER_OR_PHONE.to_string(),
                });
            }
        };

        let expires_at = Utc::now()
            .checked_add_signed(self.config.code_ttl)
            .ok_or_else(|| DomainError::Internal {
                message: "code lifetime overflows the clock".to_string(),
            })?;
        let code = self.generator.generate();
        let draft = NewOneTimeCode::new(user_id, code, expires_at)?;
        let stored = self.repository.create(draft).await?;

        tracing::info!(
            user_id = user_id,
            phone = %mask_phone_number(phone),
            event = "otp_generated",
            session_id = %stored.id,
            "Stored new one-time code"
        );

        match self.deliver(phone, &stored.code).await {
            Ok(provider) => Ok(IssuedCode {
                id: stored.id,
                user_id: stored.user_id,
                expires_at: stored.expires_at,
                provider,
            }),
            Err(error) => {
                if let Err(invalidate_error) = self.repository.mark_used(stored.id).await {
                    tracing::error!(
                        session_id = %stored.id,
                        error = %invalidate_error,
                        event = "otp_invalidate_failed",
                        "Failed to invalidate undelivered code"
                    );
                }
                Err(error)
            }
        }
    }

    async fn deliver(&self, phone: &str, code: &str) -> DomainResult<ProviderResponse> {
        let masked = mask_phone_number(phone);
        let outcome = match self.config.delivery_timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, self.gateway.send_code(phone, code)).await {
                    Ok(result) => result,
                    Err(_) => Err(DeliveryError::Timeout(limit.as_millis() as u64)),
                }
            }
            None => self.gateway.send_code(phone, code).await,
        };

        match outcome {
            Ok(payload) => {
                tracing::info!(
                    phone = %masked,
                    provider = self.gateway.provider_name(),
                    event = "otp_delivered",
                    "One-time code handed to provider"
                );
                Ok(payload)
            }
            Err(error) => {
                tracing::error!(
                    phone = %masked,
                    provider = self.gateway.provider_name(),
                    error = %error,
                    event = "otp_delivery_failed",
                    "Failed to deliver one-time code"
                );
                Err(DomainError::Delivery(error))
            }
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
