//! Token signing and one-time passcode configuration

use serde::{Deserialize, Serialize};

use super::{env_flag, env_or, Environment};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// HS256, HS384 or HS512
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 900,        // 15 minutes
            refresh_token_expiry: 1_209_600, // 14 days
            issuer: String::from("tradeguider"),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            access_token_expiry: env_or("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry),
            refresh_token_expiry: env_or(
                "JWT_REFRESH_TOKEN_EXPIRY",
                defaults.refresh_token_expiry,
            ),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            algorithm: std::env::var("JWT_ALGORITHM").unwrap_or(defaults.algorithm),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// One-time passcode settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Lifetime of a pending code in seconds
    pub ttl_seconds: u64,

    /// Failed verifications tolerated before the pending code is dropped.
    /// `None` disables the limit.
    pub max_attempts: Option<u32>,

    /// Echo the code in issue responses (development and tests only)
    #[serde(default)]
    pub expose_code: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 900,
            max_attempts: Some(5),
            expose_code: false,
        }
    }
}

impl OtpConfig {
    pub fn from_env(environment: Environment) -> Self {
        let defaults = Self::default();
        let max_attempts = match env_or("OTP_MAX_ATTEMPTS", 5u32) {
            0 => None,
            n => Some(n),
        };
        Self {
            ttl_seconds: env_or("OTP_TTL_SECONDS", defaults.ttl_seconds),
            max_attempts,
            expose_code: environment.is_debug() && env_flag("OTP_EXPOSE_CODE", false),
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}
