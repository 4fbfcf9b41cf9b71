//! `stockroomd` — the Stockroom server binary.
//!
//! Usage:
//!   stockroomd [--data-dir <dir>] [--db <path>] [--listen <addr>]
//!
//! Serves the inventory REST API plus the embedded web UI at `/`.

mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use stockroom_core::{Module, ServiceConfig};
use stockroom_doc::DocStore;
use stockroom_inventory::InventoryModule;
use tracing::info;

/// Stockroom server.
#[derive(Parser, Debug)]
#[command(name = "stockroomd", about = "Stockroom inventory server")]
struct Cli {
    /// Directory for persistent data files.
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Path to the redb database file (overrides `{data-dir}/data.redb`).
    #[arg(long = "db")]
    db_path: Option<PathBuf>,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = ServiceConfig {
        data_dir: cli.data_dir,
        db_path: cli.db_path,
        listen: cli.listen,
    };

    if let Some(dir) = &config.data_dir {
        std::fs::create_dir_all(dir)?;
    }

    // Initialize the embedded document store.
    let db_path = config.resolve_db_path();
    info!("Opening document store at {}", db_path.display());
    let db: Arc<dyn DocStore> = Arc::new(
        stockroom_doc::RedbStore::open(&db_path)
            .map_err(|e| anyhow::anyhow!("failed to open document store: {}", e))?,
    );

    let inventory = InventoryModule::new(db);
    info!("Inventory module initialized");

    let app = routes::build_router(vec![inventory.routes()]);

    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("Listening on {}", config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
