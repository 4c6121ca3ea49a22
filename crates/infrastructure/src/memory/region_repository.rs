use async_trait::async_trait;
use domain::{DomainError, Region, RegionRepository};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryRegionRepository {
    regions: RwLock<Vec<Region>>,
}

impl InMemoryRegionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegionRepository for InMemoryRegionRepository {
    async fn get(&self, id: &str) -> Result<Region, DomainError> {
        let regions = self.regions.read().await;
        regions
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(DomainError::RegionNotFound)
    }

    async fn add(&self, region: &Region) -> Result<(), DomainError> {
        let mut regions = self.regions.write().await;
        if regions.iter().any(|r| r.id == region.id) {
            return Err(DomainError::AlreadyExists(format!("region {}", region.id)));
        }
        regions.push(region.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut regions = self.regions.write().await;
        let before = regions.len();
        regions.retain(|r| r.id != id);
        if regions.len() == before {
            return Err(DomainError::RegionNotFound);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Region>, DomainError> {
        let mut regions = self.regions.read().await.clone();
        regions.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(regions)
    }

    async fn update(&self, id: &str, region: &Region) -> Result<Region, DomainError> {
        let mut regions = self.regions.write().await;
        let stored = regions
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DomainError::RegionNotFound)?;

        if !region.name.is_empty() {
            stored.name = region.name.clone();
        }
        if !region.desc.is_empty() {
            stored.desc = region.desc.clone();
        }
        Ok(stored.clone())
    }
}
