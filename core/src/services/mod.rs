//! Business services containing domain logic and use cases.

pub mod auth;
pub mod company;
pub mod otp;
pub mod review;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth::AuthService;
pub use company::CompanyService;
pub use otp::{EmailMessage, NotificationSender, OtpService, OtpServiceConfig, OtpStore};
pub use review::ReviewService;
pub use token::{TokenService, TokenServiceConfig};
pub use user::UserService;

#[cfg(test)]
pub(crate) mod fixtures;
