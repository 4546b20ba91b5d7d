//! Cache module for one-time passcode storage
//!
//! Provides a Redis client with connect retry, the Redis-backed `OtpStore`
//! and an in-process store for development and tests.

pub mod memory_store;
pub mod otp_store;
pub mod redis_client;


use std::sync::Arc;

use tg_core::services::OtpStore;
use tg_shared::{CacheBackend, CacheConfig};

use crate::InfrastructureError;

pub use memory_store::MemoryOtpStore;
pub use otp_store::RedisOtpStore;
pub use redis_client::RedisClient;

/// Create the OTP store selected by configuration
pub async fn create_otp_store(config: &CacheConfig) -> Result<Arc<dyn OtpStore>, InfrastructureError> {
    match config.backend {
        CacheBackend::Memory => {
            tracing::warn!("Using in-process OTP store; codes are lost on restart");
            Ok(Arc::new(MemoryOtpStore::new()))
        }
        CacheBackend::Redis => {
            let client = RedisClient::new(config.clone()).await?;
            Ok(Arc::new(RedisOtpStore::new(client)))
        }
    }
}
