//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// The single error returned for every failed passcode login
    pub fn invalid_credential() -> Self {
        DomainError::Auth(AuthError::InvalidCredential)
    }

    pub fn permission_denied() -> Self {
        DomainError::Auth(AuthError::PermissionDenied)
    }

    pub fn duplicate(field: impl Into<String>) -> Self {
        DomainError::ValidationErr(ValidationError::DuplicateValue {
            field: field.into(),
        })
    }

    /// True for failures that are the caller's fault rather than ours
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            DomainError::Internal { .. } | DomainError::Token(TokenError::TokenGenerationFailed)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
