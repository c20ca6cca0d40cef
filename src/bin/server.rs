//! estore Server Binary
//!
//! Starts the inventory HTTP server.

use std::sync::Arc;

use clap::Parser;
use estore::network::Server;
use estore::{Config, InventoryStore, MemoryStore, ProductFileStore};
use tracing_subscriber::{fmt, EnvFilter};

/// estore Server
#[derive(Parser, Debug)]
#[command(name = "estore-server")]
#[command(about = "Inventory backend persisting products to a JSON file")]
#[command(version)]
struct Args {
    /// JSON file holding the product array
    #[arg(short = 'f', long, env = "ESTORE_PRODUCTS_FILE", default_value = "data/products.json")]
    products_file: String,

    /// Listen address (host:port)
    #[arg(short, long, env = "ESTORE_LISTEN", default_value = "127.0.0.1:8080")]
    listen: String,

    /// Create the products file with an empty array if it is missing
    #[arg(long)]
    init: bool,

    /// Keep products in memory only; the products file is ignored
    #[arg(long, conflicts_with = "init")]
    ephemeral: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,estore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("estore Server v{}", estore::VERSION);
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .products_file(&args.products_file)
        .listen_addr(&args.listen)
        .init_if_missing(args.init)
        .build();

    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        std::process::exit(2);
    }

    // Open store
    let store: Arc<dyn InventoryStore> = if args.ephemeral {
        tracing::warn!("Ephemeral mode: products will not be persisted");
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!("Products file: {}", config.products_file.display());
        let opened = if config.init_if_missing {
            ProductFileStore::open_or_init(&config.products_file)
        } else {
            ProductFileStore::open(&config.products_file)
        };
        match opened {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!(
                    "Failed to open products file {}: {}",
                    config.products_file.display(),
                    e
                );
                std::process::exit(1);
            }
        }
    };

    tracing::info!("Store initialized successfully");

    let server = Server::new(config, store);
    if let Err(e) = server.run(shutdown_signal()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    tracing::info!("Received Ctrl+C, initiating shutdown...");
}
