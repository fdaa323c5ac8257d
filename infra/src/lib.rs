//! # Infrastructure Layer
//!
//! Concrete implementations of the ports declared in `rb_core`:
//! - **Database**: MySQL code store using SQLx, pool management and migrations
//! - **Memory**: process-local code store for development and tests
//! - **SMS**: eSMS HTTP gateway and a logging mock gateway

/// Database module - MySQL implementations using SQLx
pub mod database;

/// In-memory code store
pub mod memory;

/// SMS delivery gateways
pub mod sms;

pub use database::{DatabasePool, MySqlOneTimeCodeRepository, PoolStatistics};
pub use memory::InMemoryOneTimeCodeRepository;
pub use sms::{create_delivery_gateway, EsmsGateway, MockSmsGateway};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP client error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
