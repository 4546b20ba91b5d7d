//! In-process passcode storage.
//!
//! Expired entries read as absent and are dropped on the next write.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tg_core::services::OtpStore;
use tokio::sync::RwLock;

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// `OtpStore` kept in a map; expired entries read as absent
#[derive(Default)]
pub struct MemoryOtpStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Entries held in the map, expired or not
    #[cfg(test)]
    pub(crate) async fn held(&self) -> usize {
        self.entries.read().await.len()
    }
}

fn prune(entries: &mut HashMap<String, Entry>, now: Instant) {
    entries.retain(|_, entry| entry.is_live(now));
}

#[async_trait]
impl OtpStore for MemoryOtpStore {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        prune(&mut entries, now);
        let entry = Entry {
            value: value.to_string(),
            expires_at: now + Duration::from_secs(ttl_seconds),
        };
        if entry.is_live(now) {
            entries.insert(key.to_string(), entry);
        } else {
            entries.remove(key);
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn take(&self, key: &str) -> Result<Option<String>, String> {
        let now = Instant::now();
        Ok(self
            .entries
            .write()
            .await
            .remove(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value))
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        prune(&mut entries, Instant::now());
        Ok(())
    }

    async fn increment(&self, key: &str, ttl_seconds: u64) -> Result<i64, String> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        prune(&mut entries, now);
        let current = entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| (entry.value.parse::<i64>(), entry.expires_at));

        let (next, expires_at) = match current {
            Some((Ok(count), expires_at)) => (count + 1, expires_at),
            Some((Err(_), _)) => return Err(format!("value at {} is not an integer", key)),
            None => (1, now + Duration::from_secs(ttl_seconds)),
        };
        entries.insert(
            key.to_string(),
            Entry {
                value: next.to_string(),
                expires_at,
            },
        );
        Ok(next)
    }
}
