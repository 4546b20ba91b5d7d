use std::sync::Arc;
use tg_shared::validation::normalize_slug;
use tg_shared::{PaginatedResponse, Pagination};
use uuid::Uuid;

use crate::domain::entities::{Company, NewCompany};
use crate::domain::value_objects::{CompanyReviews, CompanySummary, RatingSummary};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{CompanyFilter, CompanyRepository, ReviewFilter, ReviewRepository};

pub struct CompanyService {
    company_repository: Arc<dyn CompanyRepository>,
    review_repository: Arc<dyn ReviewRepository>,
}

impl CompanyService {
    pub fn new(
        company_repository: Arc<dyn CompanyRepository>,
        review_repository: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            company_repository,
            review_repository,
        }
    }

    /// Open registration; no authentication involved
    pub async fn register(&self, input: NewCompany) -> DomainResult<CompanySummary> {
        input.validate()?;
        let company = Company::new(input);

        if self
            .company_repository
            .find_by_website(&company.website)
            .await?
            .is_some()
        {
            return Err(ValidationError::DuplicateValue {
                field: "website".to_string(),
            }
            .into());
        }

        let company = self.company_repository.create(company).await?;
        tracing::info!(
            company_id = %company.id,
            website = %company.website,
            is_claimed = company.is_claimed,
            event = "company_registered",
            "Registered company"
        );
        Ok(CompanySummary::new(company, RatingSummary::default()))
    }

    pub async fn get(&self, company_id: Uuid) -> DomainResult<CompanySummary> {
        self.company_repository
            .summary(company_id)
            .await?
            .ok_or_else(|| DomainError::not_found("company"))
    }

    /// Companies ordered by average rating, best first
    pub async fn list(
        &self,
        filter: CompanyFilter,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<CompanySummary>> {
        let filter = CompanyFilter {
            category: normalized(filter.category),
            subcategory: normalized(filter.subcategory),
        };
        let (items, total) = self
            .company_repository
            .list_summaries(&filter, pagination)
            .await?;
        Ok(PaginatedResponse::new(items, pagination, total))
    }

    pub async fn reviews_for_company(
        &self,
        company_id: Uuid,
        pagination: Pagination,
    ) -> DomainResult<CompanyReviews> {
        let company = self.get(company_id).await?;
        self.with_reviews(company, None, pagination).await
    }

    /// Company page located by website.
    ///
    /// An unknown website is not an error: the company is `None` and the page
    /// is empty.
    pub async fn reviews_for_website(
        &self,
        website: &str,
        subcategory: Option<String>,
        pagination: Pagination,
    ) -> DomainResult<CompanyReviews> {
        let company = match self.company_repository.find_by_website(website.trim()).await? {
            Some(company) => company,
            None => {
                return Ok(CompanyReviews {
                    company: None,
                    reviews: PaginatedResponse::empty(pagination),
                })
            }
        };
        let summary = self.get(company.id).await?;
        self.with_reviews(summary, normalized(subcategory), pagination)
            .await
    }

    async fn with_reviews(
        &self,
        company: CompanySummary,
        subcategory: Option<String>,
        pagination: Pagination,
    ) -> DomainResult<CompanyReviews> {
        let filter = ReviewFilter {
            company_id: Some(company.company.id),
            subcategory,
            ..Default::default()
        };
        let (items, total) = self.review_repository.list(&filter, pagination).await?;
        Ok(CompanyReviews {
            company: Some(company),
            reviews: PaginatedResponse::new(items, pagination, total),
        })
    }
}

fn normalized(value: Option<String>) -> Option<String> {
    value
        .map(|v| normalize_slug(&v))
        .filter(|v| !v.is_empty())
}
