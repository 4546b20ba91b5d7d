//! Transactional email configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Outbound email provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Plunk HTTP API
    Plunk,
    /// Logs messages instead of sending them
    Mock,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plunk" => Ok(EmailProvider::Plunk),
            "mock" | "log" => Ok(EmailProvider::Mock),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub provider: EmailProvider,

    /// Sent as a bearer token on every request
    #[serde(default, skip_serializing)]
    pub api_key: String,

    pub api_url: String,

    /// Fixed network timeout for one send, in seconds
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            api_key: String::new(),
            api_url: String::from("https://api.useplunk.com/v1/send"),
            request_timeout_secs: 15,
        }
    }
}

impl EmailConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_key = std::env::var("PLUNK_API_KEY").unwrap_or_default();
        // A configured key selects the real provider unless overridden
        let provider_default = if api_key.is_empty() {
            EmailProvider::Mock
        } else {
            EmailProvider::Plunk
        };
        Self {
            provider: env_or("EMAIL_PROVIDER", provider_default),
            api_key,
            api_url: std::env::var("PLUNK_API_URL").unwrap_or(defaults.api_url),
            request_timeout_secs: env_or("EMAIL_TIMEOUT_SECS", defaults.request_timeout_secs),
        }
    }
}
