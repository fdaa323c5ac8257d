//! Types for verification service results

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A code that was successfully matched and consumed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedCode {
    /// Id of the consumed record
    pub id: Uuid,
    /// Owner of the consumed record
    pub user_id: String,
    /// When the record was consumed
    pub verified_at: DateTime<Utc>,
}
