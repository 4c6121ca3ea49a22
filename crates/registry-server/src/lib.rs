pub mod api;
pub mod state;

use anyhow::Result;
use application::{LoggingMiddleware, Registry, RegistryService};
use domain::{NodeRepository, RegionRepository, UserRepository};
use infrastructure::{
    Argon2Hasher, DatabaseConfig, InMemoryNodeRepository, InMemoryRegionRepository,
    InMemoryUserRepository, PostgresNodeRepository, PostgresRegionRepository,
    PostgresUserRepository, UuidProvider,
};
use migration::{Migrator, MigratorTrait};
use sea_orm::SqlxPostgresConnector;
use sqlx::PgPool;
use state::AppState;
use std::sync::Arc;
use tracing::info;

/// The registry over the given repositories, wrapped in logging.
pub fn registry_service(
    users: Arc<dyn UserRepository>,
    nodes: Arc<dyn NodeRepository>,
    regions: Arc<dyn RegionRepository>,
) -> Arc<dyn RegistryService> {
    let registry = Registry::new(
        users,
        nodes,
        regions,
        Arc::new(Argon2Hasher::new()),
        Arc::new(UuidProvider),
    );
    LoggingMiddleware::wrap(Arc::new(registry))
}

pub fn in_memory_service() -> Arc<dyn RegistryService> {
    registry_service(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryNodeRepository::new()),
        Arc::new(InMemoryRegionRepository::new()),
    )
}

/// Connect, bring the schema up to date and build the registry on PostgreSQL.
pub async fn postgres_service(config: &DatabaseConfig) -> Result<Arc<dyn RegistryService>> {
    let pool = infrastructure::database::connect(config).await?;
    run_migrations(&pool).await?;

    Ok(registry_service(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresNodeRepository::new(pool.clone())),
        Arc::new(PostgresRegionRepository::new(pool)),
    ))
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    let connection = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());
    Migrator::up(&connection, None).await?;
    info!("Migrations applied");
    Ok(())
}

pub fn setup_app_state(service: Arc<dyn RegistryService>) -> Arc<AppState> {
    Arc::new(AppState::new(service))
}
