use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orderdesk_core::{
    config::CONFIG_PATH_VAR, load_config, validate_config, HttpFileRetriever, HttpOrderBackend,
    OrderDashboard,
};
use orderdesk_server::{
    api::create_router,
    state::{AppState, Collaborators},
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("orderdesk v{}", VERSION);

    // Determine config path
    let config_path = std::env::var(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Order backend: {}", config.backend.url);
    info!("Download directory: {:?}", config.export.download_dir);

    // Create backend adapters
    let backend = Arc::new(
        HttpOrderBackend::new(config.backend.clone())
            .context("Failed to create order backend client")?,
    );
    let retriever = Arc::new(HttpFileRetriever::new(
        config.backend.url.clone(),
        config.export.download_dir.clone(),
    ));

    let collaborators = Collaborators {
        orders: backend.clone(),
        submitter: backend.clone(),
        resolver: backend,
        retriever,
    };

    let dashboard =
        OrderDashboard::orders(&config.table).context("Failed to create order dashboard")?;

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), dashboard, collaborators));

    // Initial load; the service starts empty if the backend is unreachable
    match state.reload().await {
        Ok(count) => info!("Loaded {} orders", count),
        Err(e) => warn!("Initial order load failed, starting empty: {}", e),
    }

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
