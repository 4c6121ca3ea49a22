//! PostgreSQL repositories over a shared sqlx pool.

mod node_repository;
mod region_repository;
mod user_repository;

pub use node_repository::PostgresNodeRepository;
pub use region_repository::PostgresRegionRepository;
pub use user_repository::PostgresUserRepository;

use anyhow::Result;
use domain::DomainError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::DatabaseConfig;

/// Tables owned by the registry.
pub const TABLES: [&str; 3] = ["regions", "users", "nodes"];

/// Open a pool and check the server answers.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url())
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    tracing::info!(host = %config.host, dbname = %config.dbname, "connected to database");
    Ok(pool)
}

/// Whether `table` exists in the current schema.
pub async fn table_exists(pool: &PgPool, table: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_schema = current_schema() AND table_name = $1)",
    )
    .bind(table)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Map a sqlx failure on insert, turning unique violations into `AlreadyExists`.
fn insert_error(err: sqlx::Error, what: &str) -> DomainError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DomainError::AlreadyExists(what.to_string())
        }
        _ => storage_error(err),
    }
}

fn storage_error(err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "database query failed");
    DomainError::Storage(err.to_string())
}
