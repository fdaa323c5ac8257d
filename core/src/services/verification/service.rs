//! Main verification service implementation

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use std::sync::Arc;

use crate::errors::{DomainError, DomainResult, MISSING_USER_OR_CODE};
use crate::repositories::OneTimeCodeRepository;

use super::types::VerifiedCode;

/// Verification service for stored one-time codes
pub struct VerificationService<R>
where
    R: OneTimeCodeRepository + ?Sized,
{
    /// Store holding issued codes
    repository: Arc<R>,
}

impl<R> VerificationService<R>
where
    R: OneTimeCodeRepository + ?Sized,
{
    /// Create a new verification service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Verify `submitted` against the latest active code of `user_id`
    ///
    /// This method:
    /// 1. Rejects blank inputs
    /// 2. Looks up the latest active code for the user
    /// 3. Compares codes in constant time
    /// 4. Consumes the code with a conditional update
    ///
    /// When two callers race on the same code only one wins the update; the
    /// other sees the code as already used and gets `NotFoundOrExpired`.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedCode)` - The code matched and is now used
    /// * `Err(DomainError::Validation)` - Missing input
    /// * `Err(DomainError::NotFoundOrExpired)` - No active code
    /// * `Err(DomainError::Mismatch)` - Active code differs
    pub async fn verify(
        &self,
        user_id: Option<&str>,
        submitted: Option<&str>,
    ) -> DomainResult<VerifiedCode> {
        // user ids are opaque and matched exactly; only the code is trimmed
        let user_id = user_id.filter(|v| !v.trim().is_empty());
        let submitted = submitted.map(str::trim).filter(|v| !v.is_empty());
        let (user_id, submitted) = match (user_id, submitted) {
            (Some(user_id), Some(submitted)) => (user_id, submitted),
            _ => {
                return Err(DomainError::Validation {
                    message: MISSING_USER_OR_CODE.to_string(),
                });
            }
        };

        let record = match self.repository.find_latest_active(user_id).await? {
            Some(record) => record,
            None => {
                tracing::warn!(
                    user_id = user_id,
                    event = "otp_not_found_or_expired",
                    "No active code for user"
                );
                return Err(DomainError::NotFoundOrExpired);
            }
        };

        if !codes_match(&record.code, submitted) {
            tracing::warn!(
                user_id = user_id,
                session_id = %record.id,
                event = "otp_verification_failed",
                "Submitted code does not match"
            );
            return Err(DomainError::Mismatch);
        }

        if !self.repository.mark_used(record.id).await? {
            tracing::warn!(
                user_id = user_id,
                session_id = %record.id,
                event = "otp_already_used",
                "Code consumed by a concurrent verification"
            );
            return Err(DomainError::NotFoundOrExpired);
        }

        tracing::info!(
            user_id = user_id,
            session_id = %record.id,
            event = "otp_verified_success",
            "Verification code successfully verified"
        );

        Ok(VerifiedCode {
            id: record.id,
            user_id: record.user_id,
            verified_at: Utc::now(),
        })
    }
}

fn codes_match(stored: &str, submitted: &str) -> bool {
    stored.len() == submitted.len() && constant_time_eq(stored.as_bytes(), submitted.as_bytes())
}
