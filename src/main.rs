//! ==============================================================================
//! main.rs - system report host entry point
//! ==============================================================================
//!
//! purpose:
//!     the "hub" end of the telemetry setup. remote nodes push snapshots of
//!     their state (network, os, hardware) and this process keeps a durable,
//!     append-only trail of everything it received.
//!
//! responsibilities:
//!     - load configuration (config/server.toml or defaults)
//!     - initialize tracing for operational logs
//!     - create/open the report log once, before the listener starts
//!     - serve POST /system-reports until ctrl+c / sigterm
//!
//! relationships:
//!     - uses: config.rs (ServerConfig)
//!     - uses: log_sink.rs (FileLogSink, shared by every request)
//!     - uses: server.rs (router + listener)
//!
//! architecture:
//!
//!     ┌────────────┐   POST json   ┌──────────────────────────────┐
//!     │ node agent │ ────────────> │ handler (one call / request) │
//!     └────────────┘               └──────────┬─────────┬─────────┘
//!                                             │         │
//!                                     console │         │ append (mutex)
//!                                             ▼         ▼
//!                                        stdout   system_reports.log
//!
//! ==============================================================================

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use sysreport_host::config::ServerConfig;
use sysreport_host::log_sink::FileLogSink;
use sysreport_host::server::{self, AppState, REPORTS_PATH};

#[tokio::main]
async fn main() -> Result<()> {
    // startup banner
    println!("===========================================================");
    println!("  System Report Host");
    println!("===========================================================");

    // step 1: load configuration
    let config = ServerConfig::load_or_default();
    config.print_summary();

    // step 2: operational logging
    init_tracing(&config.logging.level)?;

    // step 3: open the report log (created if absent, never truncated)
    let sink = FileLogSink::open(&config.logging.file)
        .with_context(|| format!("failed to open report log {}", config.logging.file.display()))?;
    println!("Сервер налаштовано на логування даних у файл: {}", sink.path().display());

    // step 4: serve
    let state = AppState::new(Arc::new(sink), config.console);
    println!("\n[STARTUP] Starting report server...");
    println!("[STARTUP] Listening on http://{}:{}", config.server.host, config.server.port);
    println!("[STARTUP] POST endpoint: {}", REPORTS_PATH);
    println!("────────────────────────────────────────────────────────────");

    server::run_server(&config, state).await
}

/// RUST_LOG wins over the configured level
fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{},tower_http=info", level)))
        .context("invalid log level")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}
