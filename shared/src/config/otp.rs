//! One-time code lifecycle configuration

use serde::{Deserialize, Serialize};

use super::parse_var;

/// Smallest supported code length
pub const MIN_CODE_LENGTH: usize = 4;

/// Largest supported code length
pub const MAX_CODE_LENGTH: usize = 10;

/// Longest accepted code lifetime (one day)
pub const MAX_TTL_SECONDS: i64 = 86_400;

/// Backing store for issued codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeStoreBackend {
    #[default]
    Mysql,
    Memory,
}

impl std::str::FromStr for CodeStoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(CodeStoreBackend::Mysql),
            "memory" | "in-memory" => Ok(CodeStoreBackend::Memory),
            _ => Err(format!("Unknown code store backend: {}", s)),
        }
    }
}

/// Settings for code generation, expiry and cleanup
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in a generated code
    pub code_length: usize,
    /// Lifetime of an issued code in seconds
    pub ttl_seconds: i64,
    /// Caller-facing timeout for the delivery call; `None` leaves only the SMS client's request timeout
    #[serde(default)]
    pub delivery_timeout_ms: Option<u64>,
    /// Interval between expired-code purges; 0 disables the reaper
    pub purge_interval_seconds: u64,
    /// Which store keeps issued codes
    pub store: CodeStoreBackend,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            ttl_seconds: 300,
            delivery_timeout_ms: None,
            purge_interval_seconds: 3600,
            store: CodeStoreBackend::Mysql,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    ///
    /// Unset variables take their defaults; set but unusable ones are an
    /// error naming the variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let code_length = parse_var(&lookup, "OTP_CODE_LENGTH", defaults.code_length)?;
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code_length) {
            return Err(format!(
                "OTP_CODE_LENGTH must be between {} and {}",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH
            ));
        }

        let ttl_seconds = parse_var(&lookup, "OTP_TTL_SECONDS", defaults.ttl_seconds)?;
        if !(1..=MAX_TTL_SECONDS).contains(&ttl_seconds) {
            return Err(format!(
                "OTP_TTL_SECONDS must be between 1 and {}",
                MAX_TTL_SECONDS
            ));
        }

        // 0 or unset leaves delivery bounded by the SMS client alone
        let delivery_timeout_ms =
            Some(parse_var(&lookup, "OTP_DELIVERY_TIMEOUT_MS", 0u64)?).filter(|ms| *ms > 0);

        let store = match lookup("CODE_STORE") {
            Some(value) => value.parse()?,
            None => defaults.store,
        };

        Ok(Self {
            code_length,
            ttl_seconds,
            delivery_timeout_ms,
            purge_interval_seconds: parse_var(
                &lookup,
                "OTP_PURGE_INTERVAL_SECONDS",
                defaults.purge_interval_seconds,
            )?,
            store,
        })
    }
}
