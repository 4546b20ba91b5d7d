//! One-time passcode issuance and verification

mod config;
mod service;
mod templates;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use templates::render_email;
pub use traits::{EmailMessage, NotificationSender, OtpStore};
