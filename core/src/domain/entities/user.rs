//! User entity representing a registered reviewer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tg_shared::validation::{is_blank, is_valid_email, normalize_email};
use uuid::Uuid;

use crate::errors::ValidationError;

pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_COUNTRY_LENGTH: usize = 100;
pub const MAX_LANGUAGE_LENGTH: usize = 50;

/// User entity representing a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, never changes once assigned
    pub id: Uuid,

    /// Login email, unique across users
    pub email: String,

    pub name: String,
    pub country: String,
    pub language: String,

    pub created_at: DateTime<Utc>,

    /// Not toggled by any endpoint
    pub is_verified: bool,
}

impl User {
    /// Creates a new User from validated registration input
    pub fn new(input: NewUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(&input.email),
            name: input.name.trim().to_string(),
            country: input.country.trim().to_string(),
            language: input.language.trim().to_string(),
            created_at: Utc::now(),
            is_verified: false,
        }
    }

    /// Applies a partial profile update
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(email) = changes.email {
            self.email = normalize_email(&email);
        }
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(country) = changes.country {
            self.country = country.trim().to_string();
        }
        if let Some(language) = changes.language {
            self.language = language.trim().to_string();
        }
    }
}

/// Registration input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub country: String,
    pub language: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        validate_text("name", &self.name, MAX_NAME_LENGTH)?;
        validate_text("country", &self.country, MAX_COUNTRY_LENGTH)?;
        validate_text("language", &self.language, MAX_LANGUAGE_LENGTH)
    }
}

/// Partial profile update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.country.is_none() && self.language.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(name) = &self.name {
            validate_text("name", name, MAX_NAME_LENGTH)?;
        }
        if let Some(country) = &self.country {
            validate_text("country", country, MAX_COUNTRY_LENGTH)?;
        }
        if let Some(language) = &self.language {
            validate_text("language", language, MAX_LANGUAGE_LENGTH)?;
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(&normalize_email(email)) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Required, non-blank text with an upper bound on its length
pub(crate) fn validate_text(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }
    let actual = value.trim().chars().count();
    if actual > max {
        return Err(ValidationError::InvalidLength {
            field: field.to_string(),
            max,
            actual,
        });
    }
    Ok(())
}
