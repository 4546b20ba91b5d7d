//! MySQL implementation of the CompanyRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use tg_shared::Pagination;
use uuid::Uuid;

use tg_core::domain::entities::Company;
use tg_core::domain::value_objects::{CompanySummary, RatingSummary};
use tg_core::errors::DomainError;
use tg_core::repositories::{CompanyFilter, CompanyRepository};

use super::{column, count_column, internal, map_db_error, uuid_column};

const COMPANY_COLUMNS: &str = "c.id, c.company_name, c.category, c.subcategory, c.first_name, \
     c.last_name, c.job_title, c.work_email, c.phone_number, c.country, c.website, \
     c.created_at, c.is_verified, c.is_claimed";

/// Rating aggregate joined onto a company; no reviews averages to 0
const SUMMARY_COLUMNS: &str = "COUNT(r.id) AS number_of_reviews, \
     CAST(COALESCE(AVG(r.rating), 0) AS DOUBLE) AS average_rating";

pub struct MySqlCompanyRepository {
    pool: MySqlPool,
}

impl MySqlCompanyRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_company(row: &MySqlRow) -> Result<Company, DomainError> {
        Ok(Company {
            id: uuid_column(row, "id")?,
            company_name: column(row, "company_name")?,
            category: column(row, "category")?,
            subcategory: column(row, "subcategory")?,
            first_name: column(row, "first_name")?,
            last_name: column(row, "last_name")?,
            job_title: column(row, "job_title")?,
            work_email: column(row, "work_email")?,
            phone_number: column(row, "phone_number")?,
            country: column(row, "country")?,
            website: column(row, "website")?,
            created_at: column(row, "created_at")?,
            is_verified: column(row, "is_verified")?,
            is_claimed: column(row, "is_claimed")?,
        })
    }

    fn row_to_summary(row: &MySqlRow) -> Result<CompanySummary, DomainError> {
        let average: Option<f64> = column(row, "average_rating")?;
        let rating = RatingSummary::from_aggregate(count_column(row, "number_of_reviews")?, average);
        Ok(CompanySummary::new(Self::row_to_company(row)?, rating))
    }

    async fn find_one(&self, filter: &str, value: String) -> Result<Option<Company>, DomainError> {
        let query = format!(
            "SELECT {} FROM companies c WHERE c.{} = ? LIMIT 1",
            COMPANY_COLUMNS, filter
        );
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find company", e))?;
        row.as_ref().map(Self::row_to_company).transpose()
    }
}

#[async_trait]
impl CompanyRepository for MySqlCompanyRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, DomainError> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_by_website(&self, website: &str) -> Result<Option<Company>, DomainError> {
        self.find_one("website", website.to_string()).await
    }

    async fn create(&self, company: Company) -> Result<Company, DomainError> {
        let query = r#"
            INSERT INTO companies (
                id, company_name, category, subcategory, first_name, last_name,
                job_title, work_email, phone_number, country, website,
                created_at, is_verified, is_claimed
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(company.id.to_string())
            .bind(&company.company_name)
            .bind(&company.category)
            .bind(&company.subcategory)
            .bind(&company.first_name)
            .bind(&company.last_name)
            .bind(&company.job_title)
            .bind(&company.work_email)
            .bind(&company.phone_number)
            .bind(&company.country)
            .bind(&company.website)
            .bind(company.created_at)
            .bind(company.is_verified)
            .bind(company.is_claimed)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to create company", e, "website"))?;

        Ok(company)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let id = id.to_string();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| internal("Failed to begin transaction", e))?;

        for statement in [
            "DELETE FROM review_likes WHERE review_id IN (SELECT id FROM reviews WHERE company_id = ?)",
            "DELETE FROM review_flags WHERE review_id IN (SELECT id FROM reviews WHERE company_id = ?)",
            "DELETE FROM reviews WHERE company_id = ?",
        ] {
            sqlx::query(statement)
                .bind(&id)
                .execute(&mut *tx)
                .await
                .map_err(|e| internal("Failed to delete company reviews", e))?;
        }
        let result = sqlx::query("DELETE FROM companies WHERE id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| internal("Failed to delete company", e))?;

        tx.commit()
            .await
            .map_err(|e| internal("Failed to commit company deletion", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn summary(&self, id: Uuid) -> Result<Option<CompanySummary>, DomainError> {
        let query = format!(
            "SELECT {}, {} FROM companies c \
             LEFT JOIN reviews r ON r.company_id = c.id \
             WHERE c.id = ? GROUP BY c.id",
            COMPANY_COLUMNS, SUMMARY_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to load company summary", e))?;
        row.as_ref().map(Self::row_to_summary).transpose()
    }

    async fn list_summaries(
        &self,
        filter: &CompanyFilter,
        pagination: Pagination,
    ) -> Result<(Vec<CompanySummary>, u64), DomainError> {
        let conditions = "(? IS NULL OR c.category = ?) AND (? IS NULL OR c.subcategory = ?)";

        let query = format!(
            "SELECT {}, {} FROM companies c \
             LEFT JOIN reviews r ON r.company_id = c.id \
             WHERE {} GROUP BY c.id \
             ORDER BY average_rating DESC, c.created_at DESC, c.id \
             LIMIT ? OFFSET ?",
            COMPANY_COLUMNS, SUMMARY_COLUMNS, conditions
        );
        let rows = sqlx::query(&query)
            .bind(&filter.category)
            .bind(&filter.category)
            .bind(&filter.subcategory)
            .bind(&filter.subcategory)
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| internal("Failed to list companies", e))?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM companies c WHERE {}",
            conditions
        ))
        .bind(&filter.category)
        .bind(&filter.category)
        .bind(&filter.subcategory)
        .bind(&filter.subcategory)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| internal("Failed to count companies", e))?;

        let summaries = rows
            .iter()
            .map(Self::row_to_summary)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((summaries, total.max(0) as u64))
    }
}
