use async_trait::async_trait;
use domain::{DomainError, Region, RegionRepository};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{insert_error, storage_error};

pub struct PostgresRegionRepository {
    pool: PgPool,
}

impl PostgresRegionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_region(row: &PgRow) -> Region {
        Region {
            id: row.get("id"),
            name: row.get("name"),
            desc: row.get("description"),
        }
    }
}

#[async_trait]
impl RegionRepository for PostgresRegionRepository {
    async fn get(&self, id: &str) -> Result<Region, DomainError> {
        let row = sqlx::query("SELECT id, name, description FROM regions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref()
            .map(Self::row_to_region)
            .ok_or(DomainError::RegionNotFound)
    }

    async fn add(&self, region: &Region) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO regions (id, name, description) VALUES ($1, $2, $3)")
            .bind(&region.id)
            .bind(&region.name)
            .bind(&region.desc)
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(e, &format!("region {}", region.id)))?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM regions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RegionNotFound);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Region>, DomainError> {
        let rows = sqlx::query("SELECT id, name, description FROM regions ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows.iter().map(Self::row_to_region).collect())
    }

    async fn update(&self, id: &str, region: &Region) -> Result<Region, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE regions
            SET name = COALESCE(NULLIF($2, ''), name),
                description = COALESCE(NULLIF($3, ''), description)
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(&region.name)
        .bind(&region.desc)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.as_ref()
            .map(Self::row_to_region)
            .ok_or(DomainError::RegionNotFound)
    }
}
