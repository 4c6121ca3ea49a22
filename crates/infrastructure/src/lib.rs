//! Infrastructure layer - storage, identity and transport backends

pub mod config;
pub mod database;
pub mod identity;
pub mod memory;
pub mod transport;

pub use config::{DatabaseConfig, HttpConfig, RegistryConfig, StorageKind};
pub use database::{PostgresNodeRepository, PostgresRegionRepository, PostgresUserRepository};
pub use identity::{Argon2Hasher, UuidProvider};
pub use memory::{InMemoryNodeRepository, InMemoryRegionRepository, InMemoryUserRepository};
pub use transport::HttpClient;
