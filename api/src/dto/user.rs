use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tg_core::{User, UserChanges, UserProfile};
use uuid::Uuid;
use validator::Validate;

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub country: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub language: Option<String>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(request: UpdateUserRequest) -> Self {
        UserChanges {
            email: request.email,
            name: request.name,
            country: request.country,
            language: request.language,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub country: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
    pub is_verified: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            country: user.country,
            language: user.language,
            created_at: user.created_at,
            is_verified: user.is_verified,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub number_of_reviews: u64,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            user: profile.user.into(),
            number_of_reviews: profile.number_of_reviews,
        }
    }
}
