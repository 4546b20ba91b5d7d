//! Results of the authentication flow.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{TokenPair, User};

/// Outcome of issuing a passcode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedOtp {
    pub email: String,

    /// Seconds until the code expires
    pub expires_in: u64,

    /// Only populated when passcode echoing is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Outcome of a registration: the new account plus its first passcode
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub otp: IssuedOtp,
}

/// Outcome of a successful passcode login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub tokens: TokenPair,
    pub user: User,
}

/// A user with the number of reviews they have written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: User,
    pub number_of_reviews: u64,
}
