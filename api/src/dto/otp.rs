//! Request and response bodies for the one-time code endpoints
//!
//! Every request field is optional at the JSON level so that a missing field
//! reaches validation and gets the endpoint's own message instead of a
//! generic deserialization error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use rb_core::VerifiedCode;

/// Body of `POST /send`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    #[validate(required, length(max = 20))]
    pub phone: Option<String>,
    #[validate(required, length(max = 16))]
    pub otp: Option<String>,
}

/// Body of `POST /verify`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(required, length(max = 255))]
    pub user_id: Option<String>,
    #[validate(required, length(max = 16))]
    pub otp: Option<String>,
}

/// Body of `POST /otp/issue`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct IssueCodeRequest {
    #[validate(required, length(max = 255))]
    pub user_id: Option<String>,
    #[validate(required, length(max = 20))]
    pub phone: Option<String>,
}

/// `data` of a successful verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedCodeData {
    pub id: Uuid,
    pub verified_at: DateTime<Utc>,
}

impl From<VerifiedCode> for VerifiedCodeData {
    fn from(verified: VerifiedCode) -> Self {
        Self {
            id: verified.id,
            verified_at: verified.verified_at,
        }
    }
}
