//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, database connections and migrations, and the
//! Axum server lifecycle.

use crate::config::{Config, DatabaseConfig, StoreBackend, mask_connection_string};
use crate::infrastructure::Stores;
use crate::routes::app_router;
use crate::state::{AppSettings, AppState};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;

/// Opens a PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if no connection can be established.
pub async fn connect_pool(db: &DatabaseConfig) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(db.max_connections)
        .acquire_timeout(db.acquire_timeout)
        .idle_timeout(db.idle_timeout)
        .max_lifetime(db.max_lifetime)
        .connect(&db.url)
        .await
        .with_context(|| format!("Failed to connect to {}", mask_connection_string(&db.url)))
}

/// Builds the repositories for the configured backend.
///
/// With PostgreSQL, pending migrations are applied first.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn build_stores(config: &Config) -> Result<Stores> {
    match (config.store_backend, &config.database) {
        (StoreBackend::Postgres, Some(db)) => {
            let pool = connect_pool(db).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to migrate")?;
            tracing::info!("Migrations applied");

            Ok(Stores::postgres(Arc::new(pool)))
        }
        (StoreBackend::Postgres, None) => {
            anyhow::bail!("the postgres backend needs database settings")
        }
        (StoreBackend::Memory, _) => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Stores::memory())
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The configured store (PostgreSQL with migrations, or memory)
/// - Application services
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let stores = build_stores(&config).await?;

    let state = AppState::new(stores, AppSettings::from(&config));

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
