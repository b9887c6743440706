//! School site content server
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use schoolsite_api::{AppState, build_app};
use schoolsite_core::config::AppConfig;
use schoolsite_core::error::AppError;
use schoolsite_database::RowStores;
use schoolsite_entity::catalog::Catalog;
use schoolsite_storage::StorageManager;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, source = ?e.source, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let base =
        std::env::var("SCHOOLSITE_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    let env = std::env::var("SCHOOLSITE_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load_from(base.trim_end_matches(".toml"), &format!("config/{env}"))
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting school site server v{}", env!("CARGO_PKG_VERSION"));
    let catalog = Catalog::builtin();

    // ── Step 1: Row store + migrations ───────────────────────────
    tracing::info!(provider = ?config.database.provider, "Connecting to row store...");
    let stores = RowStores::from_config(&config.database).await?;
    stores.migrate().await?;

    // ── Step 2: Object store buckets ─────────────────────────────
    tracing::info!(provider = ?config.storage.provider, "Initializing object storage...");
    let storage = StorageManager::from_config(&config.storage).await?;
    storage.ensure_buckets(&catalog.buckets()).await?;

    // ── Step 3: Admin authentication ─────────────────────────────
    let authenticator = schoolsite_auth::from_config(&config.auth)?;
    tracing::info!(mode = authenticator.mode(), "Admin authentication ready");

    // ── Step 4: Build and start HTTP server ──────────────────────
    let addr = config.server.bind_address();
    let state = AppState::new(
        config,
        catalog,
        storage,
        stores.collections.clone(),
        stores.documents.clone(),
        authenticator,
    );
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("School site server listening on {addr}");

    // ── Step 5: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    stores.close().await;
    tracing::info!("School site server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
