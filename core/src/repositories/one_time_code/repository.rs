//! Code store trait defining persistence for one-time codes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::one_time_code::{NewOneTimeCode, OneTimeCode};
use crate::errors::DomainResult;

/// Persistence contract for one-time codes
///
/// The store exclusively owns the lifecycle of a code. Implementations must
/// make `create` and `mark_used` atomic with respect to concurrent callers:
/// `create` invalidates the user's previously active codes in the same unit
/// of work, and `mark_used` is a conditional update on `is_used = false`.
#[async_trait]
pub trait OneTimeCodeRepository: Send + Sync {
    /// Persist a new unused code, invalidating any code still active for the same user
    async fn create(&self, draft: NewOneTimeCode) -> DomainResult<OneTimeCode>;

    /// Find an active code matching both user and code
    ///
    /// # Returns
    /// * `Ok(Some(OneTimeCode))` - Unused and `expires_at > now`
    /// * `Ok(None)` - Unknown, used or expired
    async fn find_active(&self, user_id: &str, code: &str) -> DomainResult<Option<OneTimeCode>>;

    /// Find the most recently created active code for a user
    async fn find_latest_active(&self, user_id: &str) -> DomainResult<Option<OneTimeCode>>;

    /// Mark a code as used
    ///
    /// Idempotent. Returns `true` only for the call that flipped the flag;
    /// repeated calls, or calls for unknown ids, return `false`.
    async fn mark_used(&self, id: Uuid) -> DomainResult<bool>;

    /// Physically delete codes that expired before the cutoff
    async fn purge_expired(&self, before: DateTime<Utc>) -> DomainResult<u64>;
}
