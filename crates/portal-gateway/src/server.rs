//! Server startup and graceful shutdown

use anyhow::Result;
use axum::Router;
use portal_core::Config;
use std::time::Duration;

/// How long in-flight requests get to finish once a shutdown signal arrives.
const SHUTDOWN_GRACE_SECS: u64 = 30;

/// Start the server with graceful shutdown
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port);
    tracing::info!(addr = %addr, "Starting gateway");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        backend_url = %config.backend_url,
        static_dir = %config.static_dir,
        environment = %config.environment,
        max_file_size_mb = config.max_file_size_bytes / 1024 / 1024,
        "Gateway ready and accepting connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Signal handler for graceful shutdown
///
/// Listens for Ctrl+C (SIGINT) and SIGTERM signals to initiate graceful shutdown.
///
/// # Panics
/// - Panics if Ctrl+C signal handler cannot be installed (unrecoverable system error)
/// - On Unix systems, panics if SIGTERM signal handler cannot be installed (unrecoverable system error)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
    }

    tracing::info!("Shutting down gracefully...");

    // Bound the drain so a wedged connection cannot keep the process alive.
    tokio::spawn(async {
        tokio::time::sleep(Duration::from_secs(SHUTDOWN_GRACE_SECS)).await;
        tracing::error!("Graceful shutdown timed out, forcing exit");
        std::process::exit(1);
    });
}
