//! SMS delivery configuration module

use serde::{Deserialize, Serialize};

use super::parse_var;

/// Default eSMS JSON endpoint for branded one-time messages
pub const DEFAULT_ESMS_ENDPOINT: &str =
    "https://rest.esms.vn/MainService.svc/json/SendMultipleMessage_V4_post_json/";

/// Default per-request timeout for the provider call
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Which delivery gateway backs the SMS service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Log messages instead of sending them
    #[default]
    Mock,
    /// eSMS HTTP API
    Esms,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(SmsProvider::Mock),
            "esms" => Ok(SmsProvider::Esms),
            _ => Err(format!("Unknown SMS provider: {}", s)),
        }
    }
}

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Selected provider
    pub provider: SmsProvider,
    /// Provider API key
    pub api_key: String,
    /// Provider secret key
    pub secret_key: String,
    /// Registered sender brand name
    pub brand_name: String,
    /// Provider message-type flag ("2" = branded customer care)
    pub sms_type: String,
    /// Product name rendered in the message template
    pub product_name: String,
    /// Provider endpoint
    pub endpoint: String,
    /// Treat a 2xx body with a non-success CodeResult as a failure
    #[serde(default)]
    pub strict_result_code: bool,
    /// Timeout for each provider request in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::Mock,
            api_key: String::new(),
            secret_key: String::new(),
            brand_name: String::from("Reelbase"),
            sms_type: String::from("2"),
            product_name: String::from("Reelbase"),
            endpoint: DEFAULT_ESMS_ENDPOINT.to_string(),
            strict_result_code: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let provider = match lookup("SMS_PROVIDER") {
            Some(value) => value.parse()?,
            None => defaults.provider,
        };

        let request_timeout_secs = parse_var(
            &lookup,
            "ESMS_REQUEST_TIMEOUT_SECS",
            defaults.request_timeout_secs,
        )?;
        if request_timeout_secs == 0 {
            return Err("ESMS_REQUEST_TIMEOUT_SECS must be positive".to_string());
        }

        let config = Self {
            provider,
            api_key: lookup("ESMS_API_KEY").unwrap_or_default(),
            secret_key: lookup("ESMS_SECRET_KEY").unwrap_or_default(),
            brand_name: lookup("ESMS_BRAND_NAME").unwrap_or(defaults.brand_name),
            sms_type: lookup("ESMS_SMS_TYPE").unwrap_or(defaults.sms_type),
            product_name: lookup("OTP_PRODUCT_NAME").unwrap_or(defaults.product_name),
            endpoint: lookup("ESMS_ENDPOINT").unwrap_or(defaults.endpoint),
            strict_result_code: lookup("ESMS_STRICT_RESULT_CODE")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            request_timeout_secs,
        };

        if config.provider == SmsProvider::Esms
            && (config.api_key.is_empty() || config.secret_key.is_empty())
        {
            return Err("ESMS_API_KEY and ESMS_SECRET_KEY must be set when SMS_PROVIDER=esms".to_string());
        }

        Ok(config)
    }

    /// Render the one-time code message body
    pub fn render_message(&self, code: &str) -> String {
        format!("{} is your verification code for {}", code, self.product_name)
    }
}
