//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by normalised email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// Persist a new user.
    ///
    /// Fails with `ValidationError::DuplicateValue { field: "email" }` when the
    /// email is taken, even if a concurrent request won the race.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Overwrite an existing user; `NotFound` if it does not exist
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user and everything that depends on it.
    ///
    /// Returns `false` when there was nothing to delete.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
