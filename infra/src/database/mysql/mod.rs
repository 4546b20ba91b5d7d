//! MySQL repository implementations.
//!
//! UUIDs are stored as `CHAR(36)` strings. Deletes cascade explicitly inside a
//! transaction; the schema's `ON DELETE CASCADE` clauses are a second line.

mod company_repository_impl;
mod review_repository_impl;
mod user_repository_impl;

pub use company_repository_impl::MySqlCompanyRepository;
pub use review_repository_impl::MySqlReviewRepository;
pub use user_repository_impl::MySqlUserRepository;

use sqlx::mysql::MySqlRow;
use sqlx::Row;
use tg_core::errors::DomainError;
use uuid::Uuid;

/// Read a column, reporting the column name on failure
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
}

pub(crate) fn uuid_column(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw)
        .map_err(|e| DomainError::internal(format!("Invalid UUID in {}: {}", name, e)))
}

pub(crate) fn count_column(row: &MySqlRow, name: &str) -> Result<u64, DomainError> {
    let count: i64 = column(row, name)?;
    Ok(count.max(0) as u64)
}

/// Map a failed statement, turning constraint violations into domain errors
pub(crate) fn map_db_error(context: &str, error: sqlx::Error, duplicate_field: &str) -> DomainError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_unique_violation() {
            return DomainError::duplicate(duplicate_field);
        }
        if db.is_foreign_key_violation() {
            return DomainError::not_found(duplicate_field);
        }
    }
    internal(context, error)
}

pub(crate) fn internal(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, context, "Database operation failed");
    DomainError::internal(format!("{}: {}", context, error))
}
