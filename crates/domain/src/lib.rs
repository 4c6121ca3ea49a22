//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - Entities (User, Node, Region)
//! - Value Objects (UserGroup, NodeType)
//! - Validation rules (email, MAC address)
//! - Repository interfaces and identity ports (traits)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Business rules enforced at domain level
//! - Testable in isolation

pub mod error;
pub mod identity;
pub mod node;
pub mod region;
pub mod user;

// Re-export commonly used types
pub use error::DomainError;
pub use identity::{IdProvider, PasswordHasher};
pub use node::{Node, NodeRepository, NodeType};
pub use region::{Region, RegionRepository};
pub use user::{User, UserGroup, UserRepository};
