//! Server configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Maximum JSON payload size in bytes
    #[serde(default = "default_max_payload_size")]
    pub max_payload_size: usize,

    /// Proxies whose `X-Forwarded-Proto` header is trusted
    #[serde(default)]
    pub trusted_proxies: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
            max_payload_size: default_max_payload_size(),
            trusted_proxies: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env_or("SERVER_PORT", defaults.port),
            workers: env_or("SERVER_WORKERS", defaults.workers),
            max_payload_size: env_or("SERVER_MAX_PAYLOAD", defaults.max_payload_size),
            trusted_proxies: std::env::var("TRUSTED_PROXIES")
                .map(|proxies| split_list(&proxies))
                .unwrap_or(defaults.trusted_proxies),
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` or an empty list allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Max age for preflight cache in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .map(|origins| split_list(&origins))
            .unwrap_or(defaults.allowed_origins);
        Self {
            allowed_origins,
            max_age: env_or("CORS_MAX_AGE", defaults.max_age),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn default_max_payload_size() -> usize {
    256 * 1024
}

fn default_max_age() -> usize {
    3600
}
