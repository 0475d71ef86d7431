//! Todo API server.
//!
//! Wires configuration, the SQLite store and the HTTP router together:
//!
//! 1. Open the database named by the connection string and migrate it
//! 2. Build the router around a [`SqliteTodoRepository`]
//! 3. Serve until a shutdown signal arrives, draining in-flight requests
//! 4. Close the pool
//!
//! The binary in `main.rs` adds `.env` loading and the tracing subscriber.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]

pub mod config;

pub use config::{Config, ConfigError};

use anyhow::Context;
use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tokio::signal;
use todo_api_sqlite::SqliteTodoRepository;
use todo_api_web::{build_router, AppState};
use tracing::{error, info};

/// Open and migrate the store, then build the router around it.
///
/// Returns the repository alongside the router so the caller can close the
/// pool once serving stops.
///
/// # Errors
///
/// Returns error if the database cannot be opened or migrated.
pub async fn bootstrap(config: &Config) -> anyhow::Result<(Router, SqliteTodoRepository)> {
    let todos = SqliteTodoRepository::ensure(
        &config.database.connection,
        config.database.max_connections,
    )
    .await
    .context("Failed to initialize the todo store")?;

    let state = AppState::new(todos.clone(), config.environment);
    Ok((build_router(state), todos))
}

/// Serve the API on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns error if startup fails or the server stops abnormally.
pub async fn serve<F>(listener: TcpListener, config: Config, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (app, todos) = bootstrap(&config).await?;

    info!(
        address = %listener.local_addr()?,
        environment = %config.environment,
        "Server listening"
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    todos.close().await;
    info!("Server stopped");

    served.context("HTTP server error")
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns error if the address cannot be bound or serving fails.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let addr = config.server.address();
    info!(address = %addr, "Starting HTTP server");

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    serve(listener, config, shutdown_signal()).await
}

/// Wait for a shutdown signal.
///
/// Listens for:
/// - Ctrl+C (SIGINT)
/// - SIGTERM (unix only)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
