//! In-process repositories for tests and `storage = "memory"` deployments.
//!
//! Same observable semantics as the PostgreSQL repositories; data lives as
//! long as the process.

mod node_repository;
mod region_repository;
mod user_repository;

pub use node_repository::InMemoryNodeRepository;
pub use region_repository::InMemoryRegionRepository;
pub use user_repository::InMemoryUserRepository;
