//! # tyrehubd: tyrehub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the storage bundle, hasher and notifier
//! - Construct application services and the axum router
//! - Make sure the configured admin account exists
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use tyrehub_adapter_http_axum::state::AppState;
use tyrehub_adapter_storage_sqlite_sqlx::SqliteStorage;
use tyrehub_app::credentials::Argon2Hasher;
use tyrehub_app::notifier::LogNotifier;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = tyrehub_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
        max_connections: config.database.max_connections,
    }
    .build()
    .await?;
    let storage = Arc::new(SqliteStorage::new(db.pool()));

    // Services
    let state = AppState::new(
        storage,
        Argon2Hasher::new(),
        Arc::new(LogNotifier::new()),
        config.auth.session_ttl_hours,
    );

    if let Some(admin) = config.admin_bootstrap() {
        let account = state
            .auth_service
            .ensure_admin(admin.name, admin.email, admin.password)
            .await?;
        tracing::info!(email = %account.email, "admin account ready");
    }

    // HTTP
    let app = tyrehub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("tyrehubd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("tyrehubd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received, draining connections");
}
