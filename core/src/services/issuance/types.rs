//! Types for issuance service results

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::services::delivery::ProviderResponse;

/// Result of forwarding a caller-supplied code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryReceipt {
    /// Success message for the caller
    pub message: String,
    /// Provider response, unchanged
    pub data: ProviderResponse,
}

/// Result of issuing a server-generated code
///
/// Deliberately carries no code; it only ever leaves the server by SMS.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssuedCode {
    pub id: Uuid,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
    pub provider: ProviderResponse,
}
