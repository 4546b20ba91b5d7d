//! MySQL implementation of the ReviewRepository trait, including likes and flags.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use tg_shared::Pagination;
use uuid::Uuid;

use tg_core::domain::entities::{ReactionKind, Review, ReviewReaction};
use tg_core::domain::value_objects::{ReviewAuthor, ReviewCompany, ReviewDetails};
use tg_core::errors::DomainError;
use tg_core::repositories::{ReviewFilter, ReviewRepository};

use super::{column, count_column, internal, map_db_error, uuid_column};

const REVIEW_COLUMNS: &str =
    "r.id, r.user_id, r.company_id, r.rating, r.title, r.body, r.created_at, r.updated_at";

/// Review joined with its author, company and reaction counts
const DETAILS_SELECT: &str = "SELECT \
     r.id, r.user_id, r.company_id, r.rating, r.title, r.body, r.created_at, r.updated_at, \
     u.name AS author_name, u.country AS author_country, \
     (SELECT COUNT(*) FROM reviews ar WHERE ar.user_id = r.user_id) AS author_reviews, \
     c.company_name, c.website AS company_website, \
     (SELECT COUNT(*) FROM review_likes l WHERE l.review_id = r.id) AS like_count, \
     (SELECT COUNT(*) FROM review_flags f WHERE f.review_id = r.id) AS flag_count \
     FROM reviews r \
     JOIN users u ON u.id = r.user_id \
     JOIN companies c ON c.id = r.company_id";

const LIST_CONDITIONS: &str = "(? IS NULL OR r.user_id = ?) \
     AND (? IS NULL OR r.company_id = ?) \
     AND (? IS NULL OR c.subcategory = ?)";

fn reaction_table(kind: ReactionKind) -> &'static str {
    match kind {
        ReactionKind::Like => "review_likes",
        ReactionKind::Flag => "review_flags",
    }
}

pub struct MySqlReviewRepository {
    pool: MySqlPool,
}

impl MySqlReviewRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_review(row: &MySqlRow) -> Result<Review, DomainError> {
        Ok(Review {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            company_id: uuid_column(row, "company_id")?,
            rating: column(row, "rating")?,
            title: column(row, "title")?,
            body: column(row, "body")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn row_to_details(row: &MySqlRow) -> Result<ReviewDetails, DomainError> {
        let review = Self::row_to_review(row)?;
        Ok(ReviewDetails {
            author: ReviewAuthor {
                user_id: review.user_id,
                name: column(row, "author_name")?,
                country: column(row, "author_country")?,
                number_of_reviews: count_column(row, "author_reviews")?,
            },
            company: ReviewCompany {
                company_id: review.company_id,
                company_name: column(row, "company_name")?,
                company_website: column(row, "company_website")?,
            },
            like_count: count_column(row, "like_count")?,
            flag_count: count_column(row, "flag_count")?,
            review,
        })
    }

    /// Binds the three optional filters, each twice for `? IS NULL OR col = ?`
    fn filter_args(filter: &ReviewFilter) -> [Option<String>; 3] {
        [
            filter.user_id.map(|id| id.to_string()),
            filter.company_id.map(|id| id.to_string()),
            filter.subcategory.clone(),
        ]
    }
}

#[async_trait]
impl ReviewRepository for MySqlReviewRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, DomainError> {
        let query = format!("SELECT {} FROM reviews r WHERE r.id = ? LIMIT 1", REVIEW_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find review", e))?;
        row.as_ref().map(Self::row_to_review).transpose()
    }

    async fn find_details(&self, id: Uuid) -> Result<Option<ReviewDetails>, DomainError> {
        let query = format!("{} WHERE r.id = ? LIMIT 1", DETAILS_SELECT);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to load review", e))?;
        row.as_ref().map(Self::row_to_details).transpose()
    }

    async fn create(&self, review: Review) -> Result<Review, DomainError> {
        let query = r#"
            INSERT INTO reviews (id, user_id, company_id, rating, title, body, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(review.id.to_string())
            .bind(review.user_id.to_string())
            .bind(review.company_id.to_string())
            .bind(review.rating)
            .bind(&review.title)
            .bind(&review.body)
            .bind(review.created_at)
            .bind(review.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to create review", e, "company"))?;

        Ok(review)
    }

    async fn update(&self, review: Review) -> Result<Review, DomainError> {
        let query = r#"
            UPDATE reviews
            SET rating = ?, title = ?, body = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(review.rating)
            .bind(&review.title)
            .bind(&review.body)
            .bind(review.updated_at)
            .bind(review.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to update review", e))?;

        if result.rows_affected() == 0 && self.find_by_id(review.id).await?.is_none() {
            return Err(DomainError::not_found("review"));
        }
        Ok(review)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let id = id.to_string();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| internal("Failed to begin transaction", e))?;

        for statement in [
            "DELETE FROM review_likes WHERE review_id = ?",
            "DELETE FROM review_flags WHERE review_id = ?",
        ] {
            sqlx::query(statement)
                .bind(&id)
                .execute(&mut *tx)
                .await
                .map_err(|e| internal("Failed to delete review reactions", e))?;
        }
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| internal("Failed to delete review", e))?;

        tx.commit()
            .await
            .map_err(|e| internal("Failed to commit review deletion", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: &ReviewFilter,
        pagination: Pagination,
    ) -> Result<(Vec<ReviewDetails>, u64), DomainError> {
        let args = Self::filter_args(filter);

        let query = format!(
            "{} WHERE {} ORDER BY r.created_at DESC, r.id LIMIT ? OFFSET ?",
            DETAILS_SELECT, LIST_CONDITIONS
        );
        let mut select = sqlx::query(&query);
        for arg in &args {
            select = select.bind(arg.clone()).bind(arg.clone());
        }
        let rows = select
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| internal("Failed to list reviews", e))?;

        let count_query = format!(
            "SELECT COUNT(*) FROM reviews r JOIN companies c ON c.id = r.company_id WHERE {}",
            LIST_CONDITIONS
        );
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        for arg in &args {
            count = count.bind(arg.clone()).bind(arg.clone());
        }
        let total = count
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to count reviews", e))?;

        let details = rows
            .iter()
            .map(Self::row_to_details)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((details, total.max(0) as u64))
    }

    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to count user reviews", e))?;
        Ok(count.max(0) as u64)
    }

    async fn add_reaction(&self, reaction: ReviewReaction) -> Result<(), DomainError> {
        let query = format!(
            "INSERT INTO {} (review_id, user_id, created_at) VALUES (?, ?, ?)",
            reaction_table(reaction.kind)
        );

        sqlx::query(&query)
            .bind(reaction.review_id.to_string())
            .bind(reaction.user_id.to_string())
            .bind(reaction.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    DomainError::not_found("review")
                }
                other => map_db_error("Failed to record reaction", other, reaction.kind.as_str()),
            })?;

        Ok(())
    }
}
