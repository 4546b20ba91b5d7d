//! Collaborators of the passcode service: a TTL key-value store and an email sender

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Short-lived key-value storage with per-key expiry.
///
/// Single-key operations must be atomic; nothing else is assumed.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Store a value, replacing any previous one, expiring after `ttl_seconds`
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String>;

    /// Read a value; `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Read and remove a value in one atomic step; `None` when absent or
    /// expired. Of several concurrent callers at most one gets the value.
    async fn take(&self, key: &str) -> Result<Option<String>, String>;

    async fn delete(&self, key: &str) -> Result<(), String>;

    /// Increment a counter, creating it with the given expiry when absent.
    /// Returns the new value.
    async fn increment(&self, key: &str, ttl_seconds: u64) -> Result<i64, String>;
}

/// A transactional email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Delivers transactional email
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Send one message; returns a provider message id
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String>;
}
