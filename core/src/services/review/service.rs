use std::sync::Arc;
use tg_shared::{PaginatedResponse, Pagination};
use uuid::Uuid;

use crate::domain::entities::{NewReview, ReactionKind, Review, ReviewChanges, ReviewReaction};
use crate::domain::value_objects::ReviewDetails;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{CompanyRepository, ReviewFilter, ReviewRepository};

pub struct ReviewService {
    review_repository: Arc<dyn ReviewRepository>,
    company_repository: Arc<dyn CompanyRepository>,
}

impl ReviewService {
    pub fn new(
        review_repository: Arc<dyn ReviewRepository>,
        company_repository: Arc<dyn CompanyRepository>,
    ) -> Self {
        Self {
            review_repository,
            company_repository,
        }
    }

    /// Submit a review of an existing company
    pub async fn submit(&self, author: Uuid, input: NewReview) -> DomainResult<ReviewDetails> {
        input.validate()?;
        if self
            .company_repository
            .find_by_id(input.company_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("company"));
        }

        let review = self
            .review_repository
            .create(Review::new(author, input))
            .await?;
        tracing::info!(
            review_id = %review.id,
            user_id = %author,
            company_id = %review.company_id,
            rating = review.rating,
            event = "review_submitted",
            "Review submitted"
        );
        self.get(review.id).await
    }

    pub async fn get(&self, review_id: Uuid) -> DomainResult<ReviewDetails> {
        self.review_repository
            .find_details(review_id)
            .await?
            .ok_or_else(|| DomainError::not_found("review"))
    }

    pub async fn list(
        &self,
        filter: ReviewFilter,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<ReviewDetails>> {
        let (items, total) = self.review_repository.list(&filter, pagination).await?;
        Ok(PaginatedResponse::new(items, pagination, total))
    }

    /// Partial update by the review's author
    pub async fn update(
        &self,
        actor: Uuid,
        review_id: Uuid,
        changes: ReviewChanges,
    ) -> DomainResult<ReviewDetails> {
        let mut review = self.owned(actor, review_id).await?;
        if changes.is_empty() {
            return Err(DomainError::validation("no fields to update"));
        }
        changes.validate()?;

        review.apply(changes);
        self.review_repository.update(review).await?;
        tracing::info!(review_id = %review_id, user_id = %actor, event = "review_updated", "Review updated");
        self.get(review_id).await
    }

    /// Delete a review together with its likes and flags
    pub async fn delete(&self, actor: Uuid, review_id: Uuid) -> DomainResult<()> {
        self.owned(actor, review_id).await?;
        self.review_repository.delete(review_id).await?;
        tracing::info!(review_id = %review_id, user_id = %actor, event = "review_deleted", "Review deleted");
        Ok(())
    }

    pub async fn like(&self, actor: Uuid, review_id: Uuid) -> DomainResult<ReviewDetails> {
        self.react(actor, review_id, ReactionKind::Like).await
    }

    pub async fn flag(&self, actor: Uuid, review_id: Uuid) -> DomainResult<ReviewDetails> {
        self.react(actor, review_id, ReactionKind::Flag).await
    }

    async fn react(
        &self,
        actor: Uuid,
        review_id: Uuid,
        kind: ReactionKind,
    ) -> DomainResult<ReviewDetails> {
        if self.review_repository.find_by_id(review_id).await?.is_none() {
            return Err(DomainError::not_found("review"));
        }
        self.review_repository
            .add_reaction(ReviewReaction::new(review_id, actor, kind))
            .await?;
        tracing::info!(
            review_id = %review_id,
            user_id = %actor,
            kind = %kind,
            event = "review_reaction",
            "Reaction recorded"
        );
        self.get(review_id).await
    }

    async fn owned(&self, actor: Uuid, review_id: Uuid) -> DomainResult<Review> {
        let review = self
            .review_repository
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| DomainError::not_found("review"))?;
        if !review.is_owned_by(actor) {
            tracing::warn!(review_id = %review_id, user_id = %actor, event = "review_permission_denied", "Non-owner tried to modify review");
            return Err(DomainError::permission_denied());
        }
        Ok(review)
    }
}
