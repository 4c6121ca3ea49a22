use async_trait::async_trait;
use chrono::Utc;
use domain::{DomainError, Node, NodeRepository};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryNodeRepository {
    nodes: RwLock<Vec<Node>>,
}

impl InMemoryNodeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NodeRepository for InMemoryNodeRepository {
    async fn get(&self, id: &str) -> Result<Node, DomainError> {
        let nodes = self.nodes.read().await;
        nodes
            .iter()
            .find(|n| n.uuid == id)
            .cloned()
            .ok_or(DomainError::NodeNotFound)
    }

    async fn add(&self, node: &Node) -> Result<(), DomainError> {
        let mut nodes = self.nodes.write().await;
        if nodes.iter().any(|n| n.uuid == node.uuid) {
            return Err(DomainError::AlreadyExists(format!("node {}", node.uuid)));
        }
        if nodes.iter().any(|n| n.addr == node.addr) {
            return Err(DomainError::AlreadyExists(format!(
                "node with address {}",
                node.addr
            )));
        }

        let mut node = node.clone();
        node.created.get_or_insert_with(Utc::now);
        nodes.push(node);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut nodes = self.nodes.write().await;
        let before = nodes.len();
        nodes.retain(|n| n.uuid != id);
        if nodes.len() == before {
            return Err(DomainError::NodeNotFound);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Node>, DomainError> {
        Ok(self.nodes.read().await.clone())
    }

    async fn update(&self, id: &str, node: &Node) -> Result<Node, DomainError> {
        let mut nodes = self.nodes.write().await;
        if !node.addr.is_empty() && nodes.iter().any(|n| n.uuid != id && n.addr == node.addr) {
            return Err(DomainError::AlreadyExists(format!(
                "node with address {}",
                node.addr
            )));
        }

        let stored = nodes
            .iter_mut()
            .find(|n| n.uuid == id)
            .ok_or(DomainError::NodeNotFound)?;

        let mut merged = stored.clone();
        merged.merge(node)?;
        *stored = merged.clone();
        Ok(merged)
    }
}
