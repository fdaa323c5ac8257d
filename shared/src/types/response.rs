//! API response types and wrappers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response envelope used by every OTP endpoint
///
/// Success carries `message` and `data`; failures carry `message` and,
/// when an underlying cause exists, `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse<T> {
    /// Human-readable message
    pub message: String,

    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Underlying error text (present on some failures)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> MessageResponse<T> {
    /// Create a successful response
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }
}

impl MessageResponse<()> {
    /// Create a failure response with only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            error: None,
        }
    }

    /// Create a failure response with the underlying error text
    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    /// Healthy response for the named service
    pub fn healthy(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.into(),
            version: version.into(),
            timestamp: Utc::now(),
        }
    }
}
