//! Configuration for the passcode service

use tg_shared::OtpConfig;

use crate::domain::entities::DEFAULT_TTL_SECONDS;

#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Seconds a pending code stays valid
    pub ttl_seconds: u64,
    /// Failed checks tolerated before the pending code is dropped
    pub max_attempts: Option<u32>,
    /// Echo issued codes back to the caller
    pub expose_code: bool,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            max_attempts: Some(5),
            expose_code: false,
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            ttl_seconds: config.ttl_seconds,
            max_attempts: config.max_attempts,
            expose_code: config.expose_code,
        }
    }
}
