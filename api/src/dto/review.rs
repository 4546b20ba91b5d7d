use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tg_core::{NewReview, ReviewChanges, ReviewDetails, ReviewFilter};
use tg_shared::Pagination;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitReviewRequest {
    #[serde(alias = "company")]
    pub company_id: Uuid,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(alias = "body")]
    #[validate(length(min = 1, max = 10000))]
    pub review_body: String,
}

impl From<SubmitReviewRequest> for NewReview {
    fn from(request: SubmitReviewRequest) -> Self {
        NewReview {
            company_id: request.company_id,
            rating: request.rating,
            title: request.title,
            body: request.review_body,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<u8>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(alias = "body")]
    #[validate(length(min = 1, max = 10000))]
    pub review_body: Option<String>,
}

impl From<UpdateReviewRequest> for ReviewChanges {
    fn from(request: UpdateReviewRequest) -> Self {
        ReviewChanges {
            rating: request.rating,
            title: request.title,
            body: request.review_body,
        }
    }
}

/// `GET /reviews` filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewListQuery {
    pub user_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ReviewListQuery {
    pub fn filter(&self) -> ReviewFilter {
        ReviewFilter {
            user_id: self.user_id,
            company_id: self.company_id,
            ..Default::default()
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.per_page)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAuthorResponse {
    pub user_id: Uuid,
    pub name: String,
    pub country: String,
    pub number_of_reviews: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCompanyResponse {
    pub company_id: Uuid,
    pub company_name: String,
    pub company_website: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub user: ReviewAuthorResponse,
    pub company: ReviewCompanyResponse,
    pub rating: u8,
    pub title: String,
    pub review_body: String,
    pub like_count: u64,
    pub flag_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReviewDetails> for ReviewResponse {
    fn from(details: ReviewDetails) -> Self {
        let review = details.review;
        Self {
            id: review.id,
            user: ReviewAuthorResponse {
                user_id: details.author.user_id,
                name: details.author.name,
                country: details.author.country,
                number_of_reviews: details.author.number_of_reviews,
            },
            company: ReviewCompanyResponse {
                company_id: details.company.company_id,
                company_name: details.company.company_name,
                company_website: details.company.company_website,
            },
            rating: review.rating,
            title: review.title,
            review_body: review.body,
            like_count: details.like_count,
            flag_count: details.flag_count,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}
