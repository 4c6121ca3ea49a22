use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{DomainError, Node, NodeRepository, NodeType};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{insert_error, storage_error};

const SELECT_NODE: &str = "SELECT uuid, addr, name, node_type, region, latitude, longitude, created, master FROM nodes";

pub struct PostgresNodeRepository {
    pool: PgPool,
}

impl PostgresNodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_node(row: &PgRow) -> Node {
        let node_type: Option<i32> = row.get("node_type");
        let created: Option<DateTime<Utc>> = row.get("created");
        Node {
            uuid: row.get("uuid"),
            addr: row.get("addr"),
            name: row.get("name"),
            node_type: node_type.and_then(|code| NodeType::from_code(code.into())),
            region: row.get("region"),
            lat: row.get("latitude"),
            long: row.get("longitude"),
            created,
            master: row.get("master"),
        }
    }
}

#[async_trait]
impl NodeRepository for PostgresNodeRepository {
    async fn get(&self, id: &str) -> Result<Node, DomainError> {
        let row = sqlx::query(&format!("{} WHERE uuid = $1", SELECT_NODE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref()
            .map(Self::row_to_node)
            .ok_or(DomainError::NodeNotFound)
    }

    async fn add(&self, node: &Node) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO nodes (uuid, addr, name, node_type, region, latitude, longitude, created, master)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&node.uuid)
        .bind(&node.addr)
        .bind(&node.name)
        .bind(node.node_type.map(|t| t.code()))
        .bind(&node.region)
        .bind(&node.lat)
        .bind(&node.long)
        .bind(node.created.unwrap_or_else(Utc::now))
        .bind(&node.master)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, &format!("node with address {}", node.addr)))?;

        tracing::debug!(uuid = %node.uuid, addr = %node.addr, "node stored");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM nodes WHERE uuid = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NodeNotFound);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Node>, DomainError> {
        let rows = sqlx::query(&format!("{} ORDER BY created, uuid", SELECT_NODE))
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows.iter().map(Self::row_to_node).collect())
    }

    async fn update(&self, id: &str, node: &Node) -> Result<Node, DomainError> {
        let mut stored = self.get(id).await?;
        stored.merge(node)?;

        let result = sqlx::query(
            r#"
            UPDATE nodes
            SET addr = $2, name = $3, node_type = $4, region = $5,
                latitude = $6, longitude = $7, master = $8
            WHERE uuid = $1
            "#,
        )
        .bind(id)
        .bind(&stored.addr)
        .bind(&stored.name)
        .bind(stored.node_type.map(|t| t.code()))
        .bind(&stored.region)
        .bind(&stored.lat)
        .bind(&stored.long)
        .bind(&stored.master)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, &format!("node with address {}", stored.addr)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NodeNotFound);
        }
        Ok(stored)
    }
}
