use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tg_core::{Company, CompanyFilter, CompanyReviews, CompanySummary, NewCompany};
use tg_shared::{PaginatedResponse, Pagination};
use uuid::Uuid;
use validator::Validate;

use super::common::non_empty;
use super::review::ReviewResponse;

/// Open company registration. `is_claimed` follows from `work_email`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterCompanyRequest {
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub subcategory: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub job_title: String,
    #[serde(default)]
    pub work_email: String,
    #[serde(default)]
    #[validate(length(max = 15))]
    pub phone_number: String,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[validate(length(min = 1, max = 255))]
    pub website: String,
}

impl From<RegisterCompanyRequest> for NewCompany {
    fn from(request: RegisterCompanyRequest) -> Self {
        NewCompany {
            company_name: request.company_name,
            category: request.category,
            subcategory: request.subcategory,
            first_name: request.first_name,
            last_name: request.last_name,
            job_title: request.job_title,
            work_email: request.work_email,
            phone_number: request.phone_number,
            country: request.country,
            website: request.website,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyListQuery {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl CompanyListQuery {
    pub fn filter(&self) -> CompanyFilter {
        CompanyFilter {
            category: non_empty(&self.category),
            subcategory: non_empty(&self.subcategory),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.per_page)
    }
}

/// `GET /companies/reviews?website=..&subcategory=..`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct WebsiteReviewsQuery {
    #[validate(length(min = 1, max = 255))]
    pub website: String,
    pub subcategory: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl WebsiteReviewsQuery {
    pub fn subcategory(&self) -> Option<String> {
        non_empty(&self.subcategory)
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.per_page)
    }
}

/// Full company record, returned on registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub id: Uuid,
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
    pub created_at: DateTime<Utc>,
    pub is_verified: bool,
    pub is_claimed: bool,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            company_name: company.company_name,
            category: company.category,
            subcategory: company.subcategory,
            first_name: company.first_name,
            last_name: company.last_name,
            job_title: company.job_title,
            work_email: company.work_email,
            phone_number: company.phone_number,
            country: company.country,
            website: company.website,
            created_at: company.created_at,
            is_verified: company.is_verified,
            is_claimed: company.is_claimed,
        }
    }
}

/// Public listing entry with rating aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySummaryResponse {
    pub id: Uuid,
    pub company_name: String,
    pub category: String,
    pub subcategory: String,
    pub country: String,
    pub website: String,
    pub is_verified: bool,
    pub is_claimed: bool,
    pub number_of_reviews: u64,
    pub average_rating: f64,
}

impl From<CompanySummary> for CompanySummaryResponse {
    fn from(summary: CompanySummary) -> Self {
        let company = summary.company;
        Self {
            id: company.id,
            company_name: company.company_name,
            category: company.category,
            subcategory: company.subcategory,
            country: company.country,
            website: company.website,
            is_verified: company.is_verified,
            is_claimed: company.is_claimed,
            number_of_reviews: summary.rating.number_of_reviews,
            average_rating: summary.rating.average_rating,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyReviewsResponse {
    pub company: Option<CompanySummaryResponse>,
    pub reviews: PaginatedResponse<ReviewResponse>,
}

impl From<CompanyReviews> for CompanyReviewsResponse {
    fn from(view: CompanyReviews) -> Self {
        Self {
            company: view.company.map(CompanySummaryResponse::from),
            reviews: view.reviews.map(ReviewResponse::from),
        }
    }
}
