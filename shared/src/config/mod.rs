//! Configuration module with business-specific sub-modules
//!
//! Every section is read from environment variables (a `.env` file is loaded
//! by the binary before this runs) and falls back to development defaults:
//! - `auth` - JWT signing and one-time passcode settings
//! - `cache` - OTP cache backend and Redis connection
//! - `database` - relational store backend and pool sizing
//! - `email` - transactional email provider
//! - `environment` - environment detection and logging
//! - `server` - HTTP server and CORS

pub mod auth;
pub mod cache;
pub mod database;
pub mod email;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{JwtConfig, OtpConfig};
pub use cache::{CacheBackend, CacheConfig};
pub use database::{DatabaseConfig, StorageBackend};
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub jwt: JwtConfig,
    pub otp: OtpConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let environment = Environment::default();
        Self {
            environment,
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            jwt: JwtConfig::default(),
            otp: OtpConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            cors: CorsConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            jwt: JwtConfig::from_env(),
            otp: OtpConfig::from_env(environment),
            email: EmailConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Configuration backed entirely by in-process stores, used by tests
    /// and local demos that have no MySQL or Redis available.
    pub fn in_memory() -> Self {
        let mut config = Self::default();
        config.database.backend = StorageBackend::Memory;
        config.cache.backend = CacheBackend::Memory;
        config.email.provider = EmailProvider::Mock;
        config.otp.expose_code = true;
        config
    }

    /// Check settings that must never reach production unchanged.
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.environment.is_production() && self.otp.expose_code {
            return Err("OTP_EXPOSE_CODE cannot be enabled in production".to_string());
        }
        if self.environment.is_production() && self.cache.backend == CacheBackend::Memory {
            return Err("CACHE_BACKEND=memory cannot be used in production".to_string());
        }
        if self.email.provider == EmailProvider::Plunk && self.email.api_key.is_empty() {
            return Err("PLUNK_API_KEY is required when EMAIL_PROVIDER=plunk".to_string());
        }
        Ok(())
    }
}

/// Read an environment variable and parse it, falling back to `default`.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a boolean flag (`1`, `true`, `yes`, `on`).
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => matches!(
            value.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_config() {
        let config = AppConfig::in_memory();
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.email.provider, EmailProvider::Mock);
        assert!(config.otp.expose_code);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let mut config = AppConfig::in_memory();
        config.environment = Environment::Production;
        config.otp.expose_code = false;
        config.cache.backend = CacheBackend::Redis;
        assert!(config.validate().is_err());

        config.jwt.secret = "a-real-secret-from-the-vault".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_rejects_memory_cache() {
        let mut config = AppConfig::in_memory();
        config.environment = Environment::Production;
        config.otp.expose_code = false;
        config.jwt.secret = "a-real-secret-from-the-vault".to_string();
        assert!(config.validate().unwrap_err().contains("CACHE_BACKEND"));

        config.cache.backend = CacheBackend::Redis;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_plunk_requires_api_key() {
        let mut config = AppConfig::in_memory();
        config.email.provider = EmailProvider::Plunk;
        assert!(config.validate().is_err());
    }
}
