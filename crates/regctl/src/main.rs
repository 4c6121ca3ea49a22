use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use regctl::{Cli, execute};

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Diagnostics go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout();

    if let Err(e) = execute(cli, &mut stdout).await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
