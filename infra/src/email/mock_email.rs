//! Mock email sender for development and tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tg_core::services::{EmailMessage, NotificationSender};
use tg_shared::validation::mask_email;

/// Records every message instead of delivering it
#[derive(Default)]
pub struct MockEmailSender {
    sent: Mutex<Vec<EmailMessage>>,
    simulate_failure: AtomicBool,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    /// Messages sent so far, oldest first
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    pub fn message_count(&self) -> usize {
        self.sent.lock().map(|sent| sent.len()).unwrap_or(0)
    }

    pub fn last_to(&self, to: &str) -> Option<EmailMessage> {
        self.sent().into_iter().rev().find(|m| m.to == to)
    }
}

#[async_trait]
impl NotificationSender for MockEmailSender {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err("simulated email failure".to_string());
        }

        let mut sent = self
            .sent
            .lock()
            .map_err(|_| "mock sender lock poisoned".to_string())?;
        sent.push(message.clone());
        let id = format!("mock_{}", sent.len());

        tracing::info!(
            to = %mask_email(&message.to),
            subject = %message.subject,
            message_id = %id,
            "[MOCK EMAIL] message recorded"
        );
        Ok(id)
    }
}
