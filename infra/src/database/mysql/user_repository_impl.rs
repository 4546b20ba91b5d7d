//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use tg_core::domain::entities::User;
use tg_core::errors::DomainError;
use tg_core::repositories::UserRepository;

use super::{column, internal, map_db_error, uuid_column};

const USER_COLUMNS: &str = "id, email, name, country, language, created_at, is_verified";

pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        Ok(User {
            id: uuid_column(row, "id")?,
            email: column(row, "email")?,
            name: column(row, "name")?,
            country: column(row, "country")?,
            language: column(row, "language")?,
            created_at: column(row, "created_at")?,
            is_verified: column(row, "is_verified")?,
        })
    }

    async fn find_one(&self, filter: &str, value: String) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", USER_COLUMNS, filter);
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find user", e))?;
        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email.to_string()).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, email, name, country, language, created_at, is_verified)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.country)
            .bind(&user.language)
            .bind(user.created_at)
            .bind(user.is_verified)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to create user", e, "email"))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET email = ?, name = ?, country = ?, language = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.country)
            .bind(&user.language)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to update user", e, "email"))?;

        // zero affected rows also means "unchanged", so confirm the row exists
        if result.rows_affected() == 0 && self.find_by_id(user.id).await?.is_none() {
            return Err(DomainError::not_found("user"));
        }
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let id = id.to_string();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| internal("Failed to begin transaction", e))?;

        for statement in [
            "DELETE FROM review_likes WHERE user_id = ? OR review_id IN (SELECT id FROM reviews WHERE user_id = ?)",
            "DELETE FROM review_flags WHERE user_id = ? OR review_id IN (SELECT id FROM reviews WHERE user_id = ?)",
        ] {
            sqlx::query(statement)
                .bind(&id)
                .bind(&id)
                .execute(&mut *tx)
                .await
                .map_err(|e| internal("Failed to delete user reactions", e))?;
        }
        sqlx::query("DELETE FROM reviews WHERE user_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| internal("Failed to delete user reviews", e))?;
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| internal("Failed to delete user", e))?;

        tx.commit()
            .await
            .map_err(|e| internal("Failed to commit user deletion", e))?;
        Ok(result.rows_affected() > 0)
    }
}
