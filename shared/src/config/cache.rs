//! OTP cache configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Which key-value store backs pending passcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Redis,
    Memory,
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" | "in-memory" => Ok(CacheBackend::Memory),
            _ => Err(format!("Invalid cache backend: {}", s)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub backend: CacheBackend,

    /// Redis connection URL
    pub url: String,

    /// Connection attempts before giving up at startup
    pub max_retries: u32,

    /// Optional namespace prepended to every key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Redis,
            url: String::from("redis://localhost:6379"),
            max_retries: 3,
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env_or("CACHE_BACKEND", defaults.backend),
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            max_retries: env_or("REDIS_MAX_RETRIES", defaults.max_retries),
            key_prefix: std::env::var("CACHE_KEY_PREFIX")
                .ok()
                .filter(|prefix| !prefix.is_empty()),
        }
    }

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}
