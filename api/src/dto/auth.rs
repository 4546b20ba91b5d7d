use serde::{Deserialize, Serialize};
use tg_core::{IssuedOtp, LoginResult, NewUser};
use validator::Validate;

use super::user::UserResponse;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[validate(length(min = 1, max = 50))]
    pub language: String,
}

impl From<RegisterUserRequest> for NewUser {
    fn from(request: RegisterUserRequest) -> Self {
        NewUser {
            email: request.email,
            name: request.name,
            country: request.country,
            language: request.language,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginCodeRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[serde(alias = "code")]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Acknowledgement that a passcode was sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpIssuedResponse {
    pub message: String,
    pub email: String,
    pub expires_in: u64,
    /// Present only when passcode echo is enabled outside production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<IssuedOtp> for OtpIssuedResponse {
    fn from(otp: IssuedOtp) -> Self {
        Self {
            message: "OTP sent to email".to_string(),
            email: otp.email,
            expires_in: otp.expires_in,
            code: otp.code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub otp: OtpIssuedResponse,
}

/// Session issued by login or refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_expires_in: i64,
    pub user: UserResponse,
}

impl From<LoginResult> for TokenResponse {
    fn from(result: LoginResult) -> Self {
        let tokens = result.tokens;
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
            refresh_expires_in: tokens.refresh_expires_in,
            user: result.user.into(),
        }
    }
}
