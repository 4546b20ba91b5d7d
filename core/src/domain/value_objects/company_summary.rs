//! Company read views.

use serde::{Deserialize, Serialize};
use tg_shared::PaginatedResponse;

use super::rating::RatingSummary;
use super::review_details::ReviewDetails;
use crate::domain::entities::Company;

/// A company together with its computed rating statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub company: Company,
    pub rating: RatingSummary,
}

impl CompanySummary {
    pub fn new(company: Company, rating: RatingSummary) -> Self {
        Self { company, rating }
    }
}

/// A company and a page of its reviews
#[derive(Debug, Clone)]
pub struct CompanyReviews {
    pub company: Option<CompanySummary>,
    pub reviews: PaginatedResponse<ReviewDetails>,
}
