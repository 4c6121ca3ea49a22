mod entity;
mod repository;

pub use entity::Region;
pub use repository::RegionRepository;

#[cfg(test)]
pub use repository::MockRegionRepository;
