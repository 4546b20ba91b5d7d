//! Value objects representing read views and service results.

pub mod auth_response;
pub mod company_summary;
pub mod rating;
pub mod review_details;

// Re-export commonly used types
pub use auth_response::{IssuedOtp, LoginResult, Registration, UserProfile};
pub use company_summary::{CompanyReviews, CompanySummary};
pub use rating::{average_rating, RatingSummary};
pub use review_details::{ReviewAuthor, ReviewCompany, ReviewDetails};
