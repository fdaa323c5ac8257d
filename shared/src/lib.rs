//! Shared utilities and common types for the Reelbase server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON response envelope
//! - Phone number helpers (normalization, masking)

pub mod config;
pub mod types;
pub mod utils;

pub use config::{
    AppConfig, CodeStoreBackend, CorsConfig, DatabaseConfig, Environment, LoggingConfig,
    OtpConfig, ServerConfig, SmsConfig, SmsProvider,
};
pub use types::{HealthResponse, MessageResponse};
pub use utils::phone;
