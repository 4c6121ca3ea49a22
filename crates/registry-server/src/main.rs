use anyhow::Result;
use clap::Parser;
use infrastructure::{RegistryConfig, StorageKind};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use registry_server::{api, in_memory_service, postgres_service, setup_app_state};

#[derive(Parser, Debug)]
#[command(author, version, about = "Device registry service", long_about = None)]
struct Args {
    /// Directory holding default.toml and {RUN_MODE}.toml
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Listen address, overrides http.host and http.port (e.g. 0.0.0.0:8080)
    #[arg(long)]
    http_addr: Option<String>,

    /// Storage backend: postgres or memory
    #[arg(long)]
    storage: Option<StorageKind>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,regsvc=debug,application=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = RegistryConfig::load(&args.config_dir)?;
    let storage = args.storage.unwrap_or(config.storage);
    let addr = args.http_addr.unwrap_or_else(|| config.http.addr());

    info!(storage = ?storage, "Device registry starting");

    let service = match storage {
        StorageKind::Postgres => postgres_service(&config.database).await?,
        StorageKind::Memory => in_memory_service(),
    };

    let app = api::create_router(setup_app_state(service));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Device registry stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
