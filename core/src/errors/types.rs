//! Error type definitions for authentication, token handling and input validation

use thiserror::Error;

/// Authentication and authorization failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Bad, expired or mismatched passcode, or no account behind it.
    /// Callers must not be able to tell these causes apart.
    #[error("invalid otp")]
    InvalidCredential,

    /// Bearer credential missing where required, or pointing at a user that no longer exists
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Caller is authenticated but does not own the resource
    #[error("You do not have permission to perform this action")]
    PermissionDenied,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Wrong token type: expected {expected}")]
    WrongTokenType { expected: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Out of range: {field} (min: {min}, max: {max})")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("Invalid length: {field} (max: {max}, actual: {actual})")]
    InvalidLength {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Duplicate value: {field}")]
    DuplicateValue { field: String },
}

impl ValidationError {
    /// Name of the offending input field, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::InvalidFormat { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidLength { field, .. }
            | ValidationError::DuplicateValue { field } => Some(field),
            ValidationError::InvalidEmail => Some("email"),
        }
    }
}
