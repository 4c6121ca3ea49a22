use super::Region;
use crate::DomainError;
use async_trait::async_trait;

/// Persistence contract for regions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegionRepository: Send + Sync {
    async fn get(&self, id: &str) -> Result<Region, DomainError>;

    async fn add(&self, region: &Region) -> Result<(), DomainError>;

    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    async fn list(&self) -> Result<Vec<Region>, DomainError>;

    /// Overwrite name and description, non-empty fields only
    async fn update(&self, id: &str, region: &Region) -> Result<Region, DomainError>;
}
