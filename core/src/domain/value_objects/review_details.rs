//! Review read view with author and company context.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Review;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    pub user_id: Uuid,
    pub name: String,
    pub country: String,
    pub number_of_reviews: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCompany {
    pub company_id: Uuid,
    pub company_name: String,
    pub company_website: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDetails {
    pub review: Review,
    pub author: ReviewAuthor,
    pub company: ReviewCompany,
    pub like_count: u64,
    pub flag_count: u64,
}
