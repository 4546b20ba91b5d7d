//! Configuration for the token service

use jsonwebtoken::Algorithm;
use std::str::FromStr;
use tg_shared::JwtConfig;

use crate::errors::DomainError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HMAC signing secret
    pub jwt_secret: String,
    /// HS256, HS384 or HS512
    pub algorithm: Algorithm,
    /// Access token lifetime in seconds
    pub access_token_expiry_seconds: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry_seconds: i64,
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            access_token_expiry_seconds: 900,
            refresh_token_expiry_seconds: 14 * 24 * 60 * 60,
            issuer: "tradeguider".to_string(),
        }
    }
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = DomainError;

    fn try_from(config: &JwtConfig) -> Result<Self, Self::Error> {
        let algorithm = Algorithm::from_str(&config.algorithm.to_uppercase()).map_err(|_| {
            DomainError::internal(format!("Unsupported JWT algorithm: {}", config.algorithm))
        })?;
        Ok(Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            access_token_expiry_seconds: config.access_token_expiry,
            refresh_token_expiry_seconds: config.refresh_token_expiry,
            issuer: config.issuer.clone(),
        })
    }
}
