use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidsweep_core::{storage::Database, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "vidsweep")]
#[command(author, version, about = "Sweep video pages whose hosted video is gone")]
struct Cli {
    /// Report would-be removals without deleting pages or sending mail
    #[arg(short = 't', long = "test")]
    test: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize database
    let db = Database::new(&config).await?;

    commands::sweep::run(&db, &config, cli.test).await
}
