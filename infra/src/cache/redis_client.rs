//! Redis client with connection retry and key prefixing

use redis::aio::MultiplexedConnection;
use redis::{Client, RedisError};
use std::time::Duration;
use tg_shared::CacheConfig;
use tracing::{debug, info, warn};

use crate::InfrastructureError;

/// Base delay between connection attempts, doubled after each failure
const INITIAL_RETRY_DELAY_MS: u64 = 100;

/// Thin async wrapper over a multiplexed Redis connection.
///
/// Cloning is cheap; clones share the underlying connection.
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    config: CacheConfig,
}

impl RedisClient {
    /// Connect, retrying transient failures with exponential backoff
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let client = Client::open(config.url.as_str())?;
        let max_attempts = config.max_retries.max(1);
        let mut delay = Duration::from_millis(INITIAL_RETRY_DELAY_MS);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match client.get_multiplexed_tokio_connection().await {
                Ok(connection) => {
                    info!(
                        url = %mask_url(&config.url),
                        attempt,
                        "Connected to Redis"
                    );
                    return Ok(Self { connection, config });
                }
                Err(e) if attempt < max_attempts && is_retriable_error(&e) => {
                    warn!(
                        url = %mask_url(&config.url),
                        error = %e,
                        attempt,
                        max_attempts,
                        "Redis connection failed, retrying..."
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    /// `SET key value EX ttl`
    pub async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), RedisError> {
        let mut conn = self.connection.clone();
        redis::cmd("SET")
            .arg(self.key(key))
            .arg(value)
            .arg("EX")
            .arg(ttl_seconds)
            .query_async::<_, ()>(&mut conn)
            .await?;
        debug!(key, ttl_seconds, "Cached value");
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, RedisError> {
        let mut conn = self.connection.clone();
        redis::cmd("GET")
            .arg(self.key(key))
            .query_async(&mut conn)
            .await
    }

    /// Returns whether a key was removed
    pub async fn delete(&self, key: &str) -> Result<bool, RedisError> {
        let mut conn = self.connection.clone();
        let removed: i64 = redis::cmd("DEL")
            .arg(self.key(key))
            .query_async(&mut conn)
            .await?;
        Ok(removed > 0)
    }

    /// `GETDEL`: read and remove in one step
    pub async fn take(&self, key: &str) -> Result<Option<String>, RedisError> {
        let mut conn = self.connection.clone();
        redis::cmd("GETDEL")
            .arg(self.key(key))
            .query_async(&mut conn)
            .await
    }

    /// `INCR`, setting the expiry when the counter is created
    pub async fn increment(&self, key: &str, ttl_seconds: Option<u64>) -> Result<i64, RedisError> {
        let mut conn = self.connection.clone();
        let key = self.key(key);
        let count: i64 = redis::cmd("INCR").arg(&key).query_async(&mut conn).await?;
        if let (1, Some(ttl)) = (count, ttl_seconds) {
            redis::cmd("EXPIRE")
                .arg(&key)
                .arg(ttl)
                .query_async::<_, ()>(&mut conn)
                .await?;
        }
        Ok(count)
    }

    pub async fn health_check(&self) -> Result<bool, RedisError> {
        let mut conn = self.connection.clone();
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }
}

/// Hide credentials in a Redis URL for logging
pub fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}****{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}

/// Connection-level failures are worth retrying; protocol and type errors are not
pub fn is_retriable_error(error: &RedisError) -> bool {
    error.is_io_error()
        || error.is_connection_refusal()
        || error.is_connection_dropped()
        || error.is_timeout()
}
