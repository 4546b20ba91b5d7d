use std::sync::Arc;
use tg_shared::{PaginatedResponse, Pagination};
use uuid::Uuid;

use crate::domain::entities::UserChanges;
use crate::domain::value_objects::{ReviewDetails, UserProfile};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{ReviewFilter, ReviewRepository, UserRepository};

/// Profile reads and owner-only profile changes
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    review_repository: Arc<dyn ReviewRepository>,
}

impl UserService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        review_repository: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            user_repository,
            review_repository,
        }
    }

    pub async fn get_profile(&self, user_id: Uuid) -> DomainResult<UserProfile> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;
        let number_of_reviews = self.review_repository.count_by_user(user_id).await?;
        Ok(UserProfile {
            user,
            number_of_reviews,
        })
    }

    /// Partial profile update, only by the profile's owner
    pub async fn update_profile(
        &self,
        actor: Uuid,
        user_id: Uuid,
        changes: UserChanges,
    ) -> DomainResult<UserProfile> {
        if actor != user_id {
            return Err(DomainError::permission_denied());
        }
        if changes.is_empty() {
            return Err(DomainError::validation("no fields to update"));
        }
        changes.validate()?;

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;
        let previous_email = user.email.clone();
        user.apply(changes);

        if user.email != previous_email {
            if let Some(other) = self.user_repository.find_by_email(&user.email).await? {
                if other.id != user.id {
                    return Err(ValidationError::DuplicateValue {
                        field: "email".to_string(),
                    }
                    .into());
                }
            }
        }

        self.user_repository.update(user).await?;
        tracing::info!(user_id = %user_id, event = "user_updated", "Updated user profile");
        self.get_profile(user_id).await
    }

    /// Delete the account together with its reviews, likes and flags
    pub async fn delete_profile(&self, actor: Uuid, user_id: Uuid) -> DomainResult<()> {
        if actor != user_id {
            return Err(DomainError::permission_denied());
        }
        if !self.user_repository.delete(user_id).await? {
            return Err(DomainError::not_found("user"));
        }
        tracing::info!(user_id = %user_id, event = "user_deleted", "Deleted user");
        Ok(())
    }

    /// Reviews written by the user, newest first
    pub async fn list_reviews(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<ReviewDetails>> {
        if self.user_repository.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::not_found("user"));
        }
        let filter = ReviewFilter {
            user_id: Some(user_id),
            ..Default::default()
        };
        let (items, total) = self.review_repository.list(&filter, pagination).await?;
        Ok(PaginatedResponse::new(items, pagination, total))
    }
}
