//! Email module - transactional email providers
//!
//! - **Plunk**: production delivery through the Plunk HTTP API
//! - **Mock**: records messages in memory and logs them

pub mod mock_email;
pub mod plunk;


use std::sync::Arc;

use tg_core::services::NotificationSender;
use tg_shared::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

pub use mock_email::MockEmailSender;
pub use plunk::PlunkEmailSender;

/// Create the email sender selected by configuration
pub fn create_email_sender(
    config: &EmailConfig,
) -> Result<Arc<dyn NotificationSender>, InfrastructureError> {
    match config.provider {
        EmailProvider::Plunk => Ok(Arc::new(PlunkEmailSender::new(config.clone())?)),
        EmailProvider::Mock => {
            tracing::warn!("Using mock email sender; no email will be delivered");
            Ok(Arc::new(MockEmailSender::new()))
        }
    }
}
