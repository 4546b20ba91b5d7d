//! Passcode service implementation

use std::sync::Arc;
use tg_shared::validation::mask_email;

use crate::domain::entities::otp::{attempts_key, code_key};
use crate::domain::entities::{OneTimeCode, OtpPurpose};
use crate::domain::value_objects::IssuedOtp;
use crate::errors::{DomainError, DomainResult};

use super::config::OtpServiceConfig;
use super::templates::render_email;
use super::traits::{NotificationSender, OtpStore};

/// Issues, checks and consumes passcodes.
///
/// Each email has at most one pending code, stored under `otp:{email}`.
/// Issuing again replaces it; the cache TTL expires it.
pub struct OtpService {
    store: Arc<dyn OtpStore>,
    sender: Arc<dyn NotificationSender>,
    config: OtpServiceConfig,
}

impl OtpService {
    pub fn new(
        store: Arc<dyn OtpStore>,
        sender: Arc<dyn NotificationSender>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            store,
            sender,
            config,
        }
    }

    /// Generate a passcode for `email`, cache it and email it.
    ///
    /// A failed email is logged and otherwise ignored; the code stays
    /// cached and the caller still gets a success.
    pub async fn issue(&self, email: &str, purpose: OtpPurpose) -> DomainResult<IssuedOtp> {
        let code = OneTimeCode::generate();
        let ttl = self.config.ttl_seconds;

        self.store
            .set_with_expiry(&code_key(email), code.as_str(), ttl)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(email),
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to store passcode"
                );
                DomainError::internal(format!("Failed to store passcode: {}", e))
            })?;

        // A fresh code starts with a clean failure count
        self.clear_attempts(email).await;

        tracing::info!(
            email = %mask_email(email),
            purpose = ?purpose,
            ttl_seconds = ttl,
            event = "otp_issued",
            "Issued passcode"
        );

        let message = render_email(email, purpose, code.as_str(), ttl);
        match self.sender.send_email(&message).await {
            Ok(message_id) => tracing::info!(
                email = %mask_email(email),
                message_id = %message_id,
                event = "otp_email_sent",
                "Passcode email sent"
            ),
            Err(e) => tracing::error!(
                email = %mask_email(email),
                error = %e,
                event = "otp_email_failed",
                "Failed to send passcode email"
            ),
        }

        Ok(IssuedOtp {
            email: email.to_string(),
            expires_in: ttl,
            code: self.config.expose_code.then(|| code.into_string()),
        })
    }

    /// Check `candidate` against the pending code and consume it.
    ///
    /// Every failure is `InvalidCredential`, whatever the cause. Each
    /// mismatch counts against the attempt limit; reaching it drops the
    /// pending code. The code is removed with an atomic take, so of several
    /// concurrent redemptions of the same code at most one succeeds.
    pub async fn redeem(&self, email: &str, candidate: &str) -> DomainResult<()> {
        if !OneTimeCode::is_well_formed(candidate) {
            return Err(DomainError::invalid_credential());
        }

        let key = code_key(email);
        let stored = self
            .store
            .get(&key)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to read passcode: {}", e)))?;

        let Some(stored) = stored else {
            tracing::info!(email = %mask_email(email), event = "otp_missing", "No pending passcode");
            return Err(DomainError::invalid_credential());
        };

        if !OneTimeCode::from_stored(stored).matches(candidate) {
            self.record_failure(email).await?;
            return Err(DomainError::invalid_credential());
        }

        let taken = self
            .store
            .take(&key)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to consume passcode: {}", e)))?;
        // Another redemption may have taken or replaced the code since the read
        if !taken.is_some_and(|code| OneTimeCode::from_stored(code).matches(candidate)) {
            tracing::warn!(email = %mask_email(email), event = "otp_already_used", "Passcode consumed concurrently");
            return Err(DomainError::invalid_credential());
        }

        self.clear_attempts(email).await;
        tracing::info!(email = %mask_email(email), event = "otp_consumed", "Passcode verified and consumed");
        Ok(())
    }

    async fn discard(&self, email: &str) -> DomainResult<()> {
        self.store
            .delete(&code_key(email))
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete passcode: {}", e)))?;
        self.clear_attempts(email).await;
        Ok(())
    }

    async fn clear_attempts(&self, email: &str) {
        if let Err(e) = self.store.delete(&attempts_key(email)).await {
            tracing::warn!(email = %mask_email(email), error = %e, "Failed to clear passcode attempts");
        }
    }

    async fn record_failure(&self, email: &str) -> DomainResult<()> {
        let Some(max_attempts) = self.config.max_attempts else {
            tracing::warn!(email = %mask_email(email), event = "otp_mismatch", "Passcode mismatch");
            return Ok(());
        };

        let attempts = self
            .store
            .increment(&attempts_key(email), self.config.ttl_seconds)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to count passcode attempts: {}", e)))?;

        tracing::warn!(
            email = %mask_email(email),
            attempts = attempts,
            max_attempts = max_attempts,
            event = "otp_mismatch",
            "Passcode mismatch"
        );

        if attempts >= i64::from(max_attempts) {
            tracing::warn!(
                email = %mask_email(email),
                event = "otp_attempts_exhausted",
                "Too many failed attempts, dropping pending passcode"
            );
            self.discard(email).await?;
        }
        Ok(())
    }
}
