//! Stock Tracker - Backend Server

use std::net::SocketAddr;

use stock_tracker_backend::{create_app, storage::JsonFileStorage, AppState, Config, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "stock_server=debug,stock_tracker_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Stock Tracker Server");
    tracing::info!("Environment: {}", config.environment);

    // Load persisted state
    let storage = JsonFileStorage::new(&config.storage.dir);
    tracing::info!(
        "Loading state from {}",
        storage.path_for(&config.storage.key).display()
    );
    let store = Store::load(storage, config.storage.key.clone());

    // Build application
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_app(AppState::new(store, config));

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
