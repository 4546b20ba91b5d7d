//! Company repository trait.

use async_trait::async_trait;
use tg_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::Company;
use crate::domain::value_objects::CompanySummary;
use crate::errors::DomainError;

/// Optional filters for company listings; values are compared after normalisation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, DomainError>;

    async fn find_by_website(&self, website: &str) -> Result<Option<Company>, DomainError>;

    /// Persist a new company; `DuplicateValue { field: "website" }` when taken
    async fn create(&self, company: Company) -> Result<Company, DomainError>;

    /// Delete a company and its reviews (and their reactions)
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// One company with its rating statistics
    async fn summary(&self, id: Uuid) -> Result<Option<CompanySummary>, DomainError>;

    /// Companies ordered by average rating (highest first), plus the total match count
    async fn list_summaries(
        &self,
        filter: &CompanyFilter,
        pagination: Pagination,
    ) -> Result<(Vec<CompanySummary>, u64), DomainError>;
}
