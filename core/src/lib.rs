//! # Reelbase Core
//!
//! Core business logic and domain layer for the Reelbase OTP backend.
//! This crate contains the one-time code entity, the code store and delivery
//! gateway interfaces, the issuance and verification services, and the
//! error types that tie them together.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{NewOneTimeCode, OneTimeCode};
pub use errors::{DeliveryError, DomainError, DomainResult};
pub use repositories::OneTimeCodeRepository;
pub use services::{
    CodeCleanupConfig, CodeCleanupService, CodeGenerator, DeliveryGateway, DeliveryReceipt, IssuanceConfig, IssuanceService, IssuedCode,
    NumericCodeGenerator, ProviderResponse, VerificationService, VerifiedCode,
};
