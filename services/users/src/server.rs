//! HTTP server lifecycle

use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tokio::{net::TcpListener, signal, sync::watch};
use tracing::{info, warn};

use crate::config::ServerConfig;

/// Serve `app` until a shutdown signal arrives.
///
/// After the signal, in-flight requests get `shutdown_timeout` to finish.
pub async fn serve(app: Router, config: &ServerConfig) -> Result<()> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    info!("Users service listening on {}", addr);

    serve_until(listener, app, shutdown_signal(), config.shutdown_timeout()).await
}

/// Serve on `listener` until `shutdown` resolves, then drain for at most
/// `drain_timeout` before dropping the remaining connections.
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    drain_timeout: Duration,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stopping_tx, mut stopping_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            let _ = stopping_tx.send(true);
        })
        .into_future();

    let deadline = async move {
        let _ = stopping_rx.wait_for(|stopping| *stopping).await;
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => result.context("server error")?,
        _ = deadline => warn!(?drain_timeout, "Graceful shutdown timed out, dropping open connections"),
    }

    info!("Users service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        let (Ok(mut term), Ok(mut hangup)) =
            (signal(SignalKind::terminate()), signal(SignalKind::hangup()))
        else {
            warn!("Failed to install SIGTERM/SIGHUP handlers");
            return std::future::pending::<()>().await;
        };

        tokio::select! {
            _ = term.recv() => {},
            _ = hangup.recv() => {},
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down gracefully"),
        _ = terminate => info!("Received terminate signal, shutting down gracefully"),
    }
}
