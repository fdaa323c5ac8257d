//! One-time code entity for SMS-based verification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// A stored one-time code
///
/// Only the code store mutates a persisted record; everything else treats
/// it as a read-only snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeCode {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Opaque identifier of the recipient
    pub user_id: String,

    /// The numeric code
    pub code: String,

    /// Whether the code has been consumed or invalidated
    pub is_used: bool,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl OneTimeCode {
    /// Checks if the code has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Checks if the code has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// An active code is unused and not yet expired
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && !self.is_expired_at(now)
    }

    /// Checks if the code is currently active
    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }
}

/// A validated draft for a code that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOneTimeCode {
    user_id: String,
    code: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl NewOneTimeCode {
    /// Creates a draft stamped with the current time
    ///
    /// # Errors
    ///
    /// `DomainError::Validation` if `user_id` or `code` is blank, or if
    /// `expires_at` is not strictly after the creation time.
    pub fn new(
        user_id: impl Into<String>,
        code: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Self::created_at(user_id, code, Utc::now(), expires_at)
    }

    /// Creates a draft with an explicit creation time
    pub fn created_at(
        user_id: impl Into<String>,
        code: impl Into<String>,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let user_id = user_id.into();
        let code = code.into();

        if user_id.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "user_id must not be empty".to_string(),
            });
        }
        if code.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "code must not be empty".to_string(),
            });
        }
        if expires_at <= created_at {
            return Err(DomainError::Validation {
                message: "expires_at must be after created_at".to_string(),
            });
        }

        Ok(Self {
            user_id,
            code,
            created_at,
            expires_at,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Turns the draft into a fresh, unused record with a new id
    pub fn into_record(self) -> OneTimeCode {
        OneTimeCode {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            code: self.code,
            is_used: false,
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}
