//! Company entity representing a reviewed business.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tg_shared::validation::{is_valid_email, normalize_slug};
use uuid::Uuid;

use super::user::validate_text;
use crate::errors::ValidationError;

pub const MAX_COMPANY_NAME_LENGTH: usize = 200;
pub const MAX_CATEGORY_LENGTH: usize = 100;
pub const MAX_CONTACT_LENGTH: usize = 200;
pub const MAX_PHONE_LENGTH: usize = 15;
pub const MAX_WEBSITE_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub company_name: String,

    /// Normalised: lower-case with underscores
    pub category: String,
    pub subcategory: String,

    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub work_email: String,
    pub phone_number: String,

    pub country: String,

    /// Unique across companies
    pub website: String,

    pub created_at: DateTime<Utc>,
    pub is_verified: bool,

    /// True iff a work email was on record when the company was last saved
    pub is_claimed: bool,
}

impl Company {
    pub fn new(input: NewCompany) -> Self {
        let mut company = Self {
            id: Uuid::new_v4(),
            company_name: input.company_name.trim().to_string(),
            category: normalize_slug(&input.category),
            subcategory: normalize_slug(&input.subcategory),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            job_title: input.job_title.trim().to_string(),
            work_email: input.work_email.trim().to_string(),
            phone_number: input.phone_number.trim().to_string(),
            country: input.country.trim().to_string(),
            website: input.website.trim().to_string(),
            created_at: Utc::now(),
            is_verified: false,
            is_claimed: false,
        };
        company.refresh_claim();
        company
    }

    /// Re-derives `is_claimed`; must run before every save
    pub fn refresh_claim(&mut self) {
        self.is_claimed = !self.work_email.is_empty();
    }
}

/// Registration input; contact fields may be left empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCompany {
    pub company_name: String,
    pub category: String,
    pub subcategory: String,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub work_email: String,
    pub phone_number: String,
    pub country: String,
    pub website: String,
}

impl NewCompany {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_text("company_name", &self.company_name, MAX_COMPANY_NAME_LENGTH)?;
        validate_text("category", &self.category, MAX_CATEGORY_LENGTH)?;
        validate_text("country", &self.country, MAX_CATEGORY_LENGTH)?;
        validate_text("website", &self.website, MAX_WEBSITE_LENGTH)?;

        for (field, value, max) in [
            ("subcategory", &self.subcategory, MAX_CONTACT_LENGTH),
            ("first_name", &self.first_name, MAX_CONTACT_LENGTH),
            ("last_name", &self.last_name, MAX_CONTACT_LENGTH),
            ("job_title", &self.job_title, MAX_CONTACT_LENGTH),
            ("phone_number", &self.phone_number, MAX_PHONE_LENGTH),
        ] {
            let actual = value.trim().chars().count();
            if actual > max {
                return Err(ValidationError::InvalidLength {
                    field: field.to_string(),
                    max,
                    actual,
                });
            }
        }

        let work_email = self.work_email.trim();
        if !work_email.is_empty() && !is_valid_email(work_email) {
            return Err(ValidationError::InvalidFormat {
                field: "work_email".to_string(),
            });
        }
        Ok(())
    }
}
