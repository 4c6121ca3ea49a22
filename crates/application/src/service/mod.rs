mod registry;

pub use registry::Registry;

use async_trait::async_trait;
use domain::{DomainError, Node, Region, User};

/// The registry's business operations.
///
/// Implemented by [`Registry`] and by decorators such as
/// [`LoggingMiddleware`](crate::middleware::LoggingMiddleware).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryService: Send + Sync {
    /// Check `password` against the stored hash of user `id`.
    async fn auth_user(&self, id: &str, password: &str) -> Result<(), DomainError>;

    async fn get_user(&self, id: &str) -> Result<User, DomainError>;

    /// Create a user from name, email, password and region.
    async fn add_user(&self, user: User) -> Result<(), DomainError>;

    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    async fn delete_user(&self, id: &str) -> Result<(), DomainError>;

    /// Update region and/or group of user `id`.
    async fn update_user(&self, id: &str, user: User) -> Result<User, DomainError>;

    async fn add_node(&self, node: Node) -> Result<(), DomainError>;

    async fn get_node(&self, id: &str) -> Result<Node, DomainError>;

    async fn list_nodes(&self) -> Result<Vec<Node>, DomainError>;

    async fn delete_node(&self, id: &str) -> Result<(), DomainError>;

    async fn update_node(&self, id: &str, node: Node) -> Result<Node, DomainError>;

    async fn add_region(&self, region: Region) -> Result<(), DomainError>;

    async fn list_regions(&self) -> Result<Vec<Region>, DomainError>;
}
