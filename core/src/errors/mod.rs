//! Domain-specific error types and user-facing messages.

mod messages;


pub use messages::*;

use thiserror::Error;

/// Failure while handing a code to the delivery provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// Connection, TLS or body-decoding failure
    #[error("{0}")]
    Transport(String),

    /// Provider answered with a non-2xx status
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Provider accepted the request but refused to send the message
    #[error("provider rejected the message (CodeResult {code}): {message}")]
    Rejected { code: String, message: String },

    /// Caller-facing timeout elapsed before the provider answered
    #[error("delivery timed out after {0} ms")]
    Timeout(u64),
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// A required input is missing or malformed
    #[error("{message}")]
    Validation { message: String },

    /// The delivery gateway failed
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// No active code exists for the user
    #[error("{}", CODE_NOT_FOUND_OR_EXPIRED)]
    NotFoundOrExpired,

    /// An active code exists but the submitted one differs
    #[error("{}", CODE_MISMATCH)]
    Mismatch,

    /// Store or other infrastructure failure
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "validation_error",
            DomainError::Delivery(_) => "delivery_error",
            DomainError::NotFoundOrExpired => "not_found_or_expired",
            DomainError::Mismatch => "mismatch",
            DomainError::Internal { .. } => "internal_error",
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
