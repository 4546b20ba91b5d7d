//! Main authentication service implementation

use std::sync::Arc;
use tg_shared::validation::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::{Claims, NewUser, OtpPurpose, TokenType, User};
use crate::domain::value_objects::{IssuedOtp, LoginResult, Registration};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::otp::OtpService;
use crate::services::token::TokenService;

/// Orchestrates registration, passcode login and session refresh
pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    otp_service: Arc<OtpService>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        otp_service: Arc<OtpService>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_repository,
            otp_service,
            token_service,
        }
    }

    /// Create an account and send its first passcode
    pub async fn register(&self, input: NewUser) -> DomainResult<Registration> {
        // Step 1: Validate input
        input.validate()?;
        let user = User::new(input);

        // Step 2: Email must be unique
        if self.user_repository.exists_by_email(&user.email).await? {
            return Err(ValidationError::DuplicateValue {
                field: "email".to_string(),
            }
            .into());
        }

        // Step 3: Persist; the repository re-checks uniqueness for concurrent requests
        let user = self.user_repository.create(user).await?;
        tracing::info!(
            user_id = %user.id,
            email = %mask_email(&user.email),
            event = "user_registered",
            "Registered new user"
        );

        // Step 4: Issue the registration passcode
        let otp = self
            .otp_service
            .issue(&user.email, OtpPurpose::Registration)
            .await?;

        Ok(Registration { user, otp })
    }

    /// Send a login passcode.
    ///
    /// Only the email syntax is checked; whether an account exists is not
    /// revealed.
    pub async fn request_login_code(&self, email: &str) -> DomainResult<IssuedOtp> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        self.otp_service.issue(&email, OtpPurpose::Login).await
    }

    /// Exchange a passcode for a token pair.
    ///
    /// No pending code, a wrong code and an unknown account all produce the
    /// same `InvalidCredential`.
    pub async fn login(&self, email: &str, code: &str) -> DomainResult<LoginResult> {
        let email = normalize_email(email);

        // Step 1: Check and burn the pending passcode
        self.otp_service.redeem(&email, code).await?;

        // Step 2: Resolve the account
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                tracing::warn!(email = %mask_email(&email), event = "login_unknown_user", "Passcode login for unknown account");
                DomainError::invalid_credential()
            })?;

        // Step 3: Mint tokens
        let tokens = self.token_service.issue_pair(user.id)?;

        tracing::info!(user_id = %user.id, event = "login_success", "User logged in");
        Ok(LoginResult { tokens, user })
    }

    /// Mint a fresh token pair from a valid refresh token
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<LoginResult> {
        let claims = self.token_service.verify(refresh_token, TokenType::Refresh)?;
        let user = self.resolve(&claims).await?;
        let tokens = self.token_service.issue_pair(user.id)?;

        tracing::info!(user_id = %user.id, event = "token_refreshed", "Refreshed token pair");
        Ok(LoginResult { tokens, user })
    }

    /// Resolve a bearer access token to its user
    pub async fn authenticate(&self, access_token: &str) -> DomainResult<(User, Claims)> {
        let claims = self.token_service.verify(access_token, TokenType::Access)?;
        let user = self.resolve(&claims).await?;
        Ok((user, claims))
    }

    async fn resolve(&self, claims: &Claims) -> DomainResult<User> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Auth(AuthError::AuthenticationFailed))?;
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::AuthenticationFailed))
    }
}
