// API Server Binary Entry Point
//
// Purpose: Start the Axum API server over the placement engine
// Usage: cargo run --features api --bin api_server

use placement_engine::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "placement_engine=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    // CATALOG_PATH unset: bundled catalog
    let config = ServerConfig::from_env();

    tracing::info!("Configuration:");
    match &config.catalog_path {
        Some(path) => tracing::info!("  CATALOG_PATH: {}", path.display()),
        None => tracing::info!("  CATALOG_PATH: <bundled>"),
    }
    tracing::info!("  PORT: {}", config.port);

    let catalog = config.load_catalog()?;
    let state = AppState::new(catalog);
    tracing::info!("Application state initialized successfully");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
