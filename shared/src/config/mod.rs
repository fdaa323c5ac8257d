//! Configuration module
//!
//! - `database` - MySQL connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `otp` - Code length, lifetime, timeout and store selection
//! - `server` - HTTP server and CORS configuration
//! - `sms` - Delivery gateway credentials and message template

pub mod database;
pub mod environment;
pub mod otp;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use otp::{CodeStoreBackend, OtpConfig};
pub use server::{CorsConfig, ServerConfig};
pub use sms::{SmsConfig, SmsProvider};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub sms: SmsConfig,
    pub otp: OtpConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            sms: SmsConfig::default(),
            otp: OtpConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Returns an error message naming the offending variable when a value
    /// is present but unusable.
    pub fn from_env() -> Result<Self, String> {
        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }

        Ok(Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            sms: SmsConfig::from_env()?,
            otp: OtpConfig::from_env()?,
            cors: CorsConfig::from_env(),
            logging,
        })
    }
}

/// Parse `name` from `lookup`, falling back to `default` only when unset
///
/// A value that is present but does not parse is an error naming the
/// variable.
pub(crate) fn parse_var<T, F>(lookup: &F, name: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{} has an invalid value: {:?}", name, raw)),
        None => Ok(default),
    }
}
