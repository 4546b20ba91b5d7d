//! Redis-backed passcode storage

use async_trait::async_trait;
use tg_core::services::OtpStore;

use super::RedisClient;

/// `OtpStore` over Redis; expiry is enforced by the server-side TTL
pub struct RedisOtpStore {
    client: RedisClient,
}

impl RedisOtpStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.client
            .set_with_expiry(key, value, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.client.get(key).await.map_err(|e| e.to_string())
    }

    async fn take(&self, key: &str) -> Result<Option<String>, String> {
        self.client.take(key).await.map_err(|e| e.to_string())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.client
            .delete(key)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn increment(&self, key: &str, ttl_seconds: u64) -> Result<i64, String> {
        self.client
            .increment(key, Some(ttl_seconds))
            .await
            .map_err(|e| e.to_string())
    }
}
