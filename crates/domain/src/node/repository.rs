use super::Node;
use crate::DomainError;
use async_trait::async_trait;

/// Persistence contract for nodes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NodeRepository: Send + Sync {
    /// Fetch a node by id, `NodeNotFound` when missing
    async fn get(&self, id: &str) -> Result<Node, DomainError>;

    async fn add(&self, node: &Node) -> Result<(), DomainError>;

    /// Delete a node by id, `NodeNotFound` when nothing was deleted
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    async fn list(&self) -> Result<Vec<Node>, DomainError>;

    /// Merge the non-empty fields of `node` into the stored node (see `Node::merge`)
    async fn update(&self, id: &str, node: &Node) -> Result<Node, DomainError>;
}
