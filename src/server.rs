//! ==============================================================================
//! server.rs - router, shared state and listener lifecycle
//! ==============================================================================
//!
//! relationships:
//!     - used by: main.rs (run_server), tests (create_router, serve)
//!     - routes to: handler.rs
//!
//! the only state shared between requests is the report log. everything
//! else lives for one request.
//!
//! ==============================================================================

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, routing::post, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::{ConsoleConfig, ServerConfig};
use crate::handler;
use crate::log_sink::LogSink;

pub const REPORTS_PATH: &str = "/system-reports";

#[derive(Clone)]
pub struct AppState {
    /// append-only report log, opened once at startup
    pub sink: Arc<dyn LogSink>,
    pub console: ConsoleConfig,
}

impl AppState {
    pub fn new(sink: Arc<dyn LogSink>, console: ConsoleConfig) -> Self {
        Self { sink, console }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(REPORTS_PATH, post(handler::receive_report))
        // reports of any size are accepted
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// bind the configured address and serve until ctrl+c / sigterm
pub async fn run_server(config: &ServerConfig, state: AppState) -> Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    serve(listener, state).await
}

/// serve on an already bound listener
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let local = listener.local_addr()?;
    info!(addr = %local, path = REPORTS_PATH, "report listener ready");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("report listener stopped");
    Ok(())
}

/// await a signal; if its handler cannot be installed, never resolve
async fn signal_or_park<F, E>(signal: F, name: &str)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    if let Err(e) = signal.await {
        tracing::error!("failed to install {} handler: {}", name, e);
        std::future::pending::<()>().await;
    }
}

async fn shutdown_signal() {
    let ctrl_c = signal_or_park(tokio::signal::ctrl_c(), "Ctrl+C");

    #[cfg(unix)]
    let terminate = signal_or_park(
        async {
            let mut signal = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
            signal.recv().await;
            Ok::<(), std::io::Error>(())
        },
        "SIGTERM",
    );

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received CTRL+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
