//! Review entity and the like/flag reactions attached to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::validate_text;
use crate::errors::ValidationError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_BODY_LENGTH: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,

    /// 1 to 5 stars
    pub rating: u8,

    pub title: String,
    pub body: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(user_id: Uuid, input: NewReview) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            company_id: input.company_id,
            rating: input.rating,
            title: input.title.trim().to_string(),
            body: input.body.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Applies a partial update and bumps `updated_at`
    pub fn apply(&mut self, changes: ReviewChanges) {
        if let Some(rating) = changes.rating {
            self.rating = rating;
        }
        if let Some(title) = changes.title {
            self.title = title.trim().to_string();
        }
        if let Some(body) = changes.body {
            self.body = body.trim().to_string();
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub company_id: Uuid,
    pub rating: u8,
    pub title: String,
    pub body: String,
}

impl NewReview {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_rating(self.rating)?;
        validate_text("title", &self.title, MAX_TITLE_LENGTH)?;
        validate_text("review_body", &self.body, MAX_BODY_LENGTH)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewChanges {
    pub rating: Option<u8>,
    pub title: Option<String>,
    pub body: Option<String>,
}

impl ReviewChanges {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.title.is_none() && self.body.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(rating) = self.rating {
            validate_rating(rating)?;
        }
        if let Some(title) = &self.title {
            validate_text("title", title, MAX_TITLE_LENGTH)?;
        }
        if let Some(body) = &self.body {
            validate_text("review_body", body, MAX_BODY_LENGTH)?;
        }
        Ok(())
    }
}

pub fn validate_rating(rating: u8) -> Result<(), ValidationError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: MIN_RATING.to_string(),
            max: MAX_RATING.to_string(),
        })
    }
}

/// Kind of reaction a user can leave on someone's review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Flag,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Flag => "flag",
        }
    }
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A like or flag; at most one of each kind per (user, review)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewReaction {
    pub review_id: Uuid,
    pub user_id: Uuid,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl ReviewReaction {
    pub fn new(review_id: Uuid, user_id: Uuid, kind: ReactionKind) -> Self {
        Self {
            review_id,
            user_id,
            kind,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_stars() -> NewReview {
        NewReview {
            company_id: Uuid::new_v4(),
            rating: 4,
            title: "Solid work".to_string(),
            body: "Came on time and fixed the roof.".to_string(),
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_new_review_validation() {
        assert!(four_stars().validate().is_ok());

        let untitled = NewReview {
            title: String::new(),
            ..four_stars()
        };
        assert!(matches!(
            untitled.validate(),
            Err(ValidationError::RequiredField { field }) if field == "title"
        ));

        let long_title = NewReview {
            title: "t".repeat(MAX_TITLE_LENGTH + 1),
            ..four_stars()
        };
        assert!(long_title.validate().is_err());
    }

    #[test]
    fn test_apply_bumps_updated_at() {
        let user_id = Uuid::new_v4();
        let mut review = Review::new(user_id, four_stars());
        let before = review.updated_at;
        review.apply(ReviewChanges {
            rating: Some(2),
            ..Default::default()
        });
        assert_eq!(review.rating, 2);
        assert_eq!(review.title, "Solid work");
        assert!(review.updated_at >= before);
        assert!(review.is_owned_by(user_id));
        assert!(!review.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_reaction_kind_display() {
        assert_eq!(ReactionKind::Like.to_string(), "like");
        assert_eq!(ReactionKind::Flag.as_str(), "flag");
    }
}
