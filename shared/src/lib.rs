//! Shared utilities and common types for the TradeGuider server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The response envelope and pagination types
//! - Validation helpers and error codes

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheBackend, CacheConfig, CorsConfig, DatabaseConfig, EmailConfig,
    EmailProvider, Environment, JwtConfig, LogFormat, LoggingConfig, OtpConfig, ServerConfig,
    StorageBackend,
};
pub use errors::error_codes;
pub use types::{ApiResponse, ErrorDetail, PaginatedResponse, Pagination};
pub use utils::validation;
