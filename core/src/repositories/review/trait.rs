//! Review repository trait, including likes and flags.

use async_trait::async_trait;
use tg_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::{ReactionKind, Review, ReviewReaction};
use crate::domain::value_objects::ReviewDetails;
use crate::errors::DomainError;

/// Optional filters for review listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    /// Reviews written by this user
    pub user_id: Option<Uuid>,
    /// Reviews of this company
    pub company_id: Option<Uuid>,
    /// Reviews of companies in this (normalised) subcategory
    pub subcategory: Option<String>,
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, DomainError>;

    /// The review with author, company and reaction counts
    async fn find_details(&self, id: Uuid) -> Result<Option<ReviewDetails>, DomainError>;

    async fn create(&self, review: Review) -> Result<Review, DomainError>;

    async fn update(&self, review: Review) -> Result<Review, DomainError>;

    /// Delete a review and its likes and flags
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Matching reviews, newest first, plus the total match count
    async fn list(
        &self,
        filter: &ReviewFilter,
        pagination: Pagination,
    ) -> Result<(Vec<ReviewDetails>, u64), DomainError>;

    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, DomainError>;

    /// Record a like or flag.
    ///
    /// A second reaction of the same kind by the same user fails with
    /// `ValidationError::DuplicateValue`.
    async fn add_reaction(&self, reaction: ReviewReaction) -> Result<(), DomainError>;
}
