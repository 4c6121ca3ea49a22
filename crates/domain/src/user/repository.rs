use super::User;
use crate::DomainError;
use async_trait::async_trait;

/// Persistence contract for users
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by id, `UserNotFound` when missing
    async fn get(&self, id: &str) -> Result<User, DomainError>;

    async fn add(&self, user: &User) -> Result<(), DomainError>;

    /// Delete a user by id, `UserNotFound` when nothing was deleted
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Rewrite the mutable fields (region, group) and return the stored user.
    ///
    /// Region is written only when non-empty, group only when present.
    async fn update(&self, id: &str, user: &User) -> Result<User, DomainError>;
}
