//! HTTP server initialization and runtime setup.
//!
//! Installs the backend client, builds the application state and runs the Axum
//! server until a shutdown signal arrives.

use crate::config::Config;
use crate::infrastructure::supabase;
use crate::routes::app_router;
use crate::state::{AppState, Backend};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The process-wide backend client
/// - Application services over the hosted backend
/// - Axum HTTP server with graceful shutdown
///
/// An unreachable backend is logged but does not stop startup; `/health` reports it.
///
/// # Errors
///
/// Returns an error if:
/// - The backend client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let client = supabase::init_global(&config.supabase()?)
        .context("Failed to initialize the backend client")?;

    match client.health().await {
        Ok(()) => tracing::info!("Backend reachable"),
        Err(e) => tracing::warn!(error = %e, "Backend not reachable at startup"),
    }

    let state = AppState::new(Backend::supabase(client), config.cookie_secure);

    let app = app_router(state, config.behind_proxy, config.request_timeout());

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
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

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
///
/// In-flight requests finish; their handlers are dropped if the client goes away.
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
