//! Main token service implementation

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::{Claims, TokenPair, TokenType};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Signs and verifies access and refresh tokens with a shared HMAC secret.
///
/// Nothing is stored server side, so a token stays valid until it expires.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service; rejects non-HMAC algorithms and empty secrets
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::internal(format!(
                "Token signing requires an HMAC algorithm, got {:?}",
                config.algorithm
            )));
        }
        if config.jwt_secret.is_empty() {
            return Err(DomainError::internal("JWT secret must not be empty"));
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Mint an access token and a refresh token for a user
    pub fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, DomainError> {
        let access_token = self.sign(&Claims::new(
            user_id,
            TokenType::Access,
            self.config.access_token_expiry_seconds,
            &self.config.issuer,
        ))?;
        let refresh_token = self.sign(&Claims::new(
            user_id,
            TokenType::Refresh,
            self.config.refresh_token_expiry_seconds,
            &self.config.issuer,
        ))?;

        tracing::debug!(user_id = %user_id, event = "tokens_issued", "Issued token pair");

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry_seconds,
            self.config.refresh_token_expiry_seconds,
        ))
    }

    /// Check signature, expiry, issuer and token type, returning the claims
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, DomainError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let error = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::InvalidIssuer
                    | ErrorKind::MissingRequiredClaim(_)
                    | ErrorKind::Json(_) => TokenError::InvalidClaims,
                    _ => TokenError::InvalidTokenFormat,
                };
                tracing::debug!(error = %e, "Token rejected");
                DomainError::Token(error)
            })?;

        if claims.typ != expected {
            return Err(DomainError::Token(TokenError::WrongTokenType {
                expected: expected.as_str().to_string(),
            }));
        }
        if claims.user_id().is_err() {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }
        Ok(claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(self.config.algorithm), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}
