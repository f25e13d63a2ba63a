//! Staybook - Web Server Entry Point

use anyhow::Context;
use clap::Parser;
use staybook::{
    api::create_router,
    config::Config,
    logging,
    state::{AppState, AppStateOptions, StoreKind},
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(name = "staybook-server", version, about = "Hotel booking REST server")]
struct Args {
    /// Configuration file (overrides STAYBOOK_CONFIG)
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Run against an in-memory store instead of Postgres
    #[clap(long)]
    memory: bool,

    /// Skip database migrations on startup
    #[clap(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration first to get logging settings
    let config = Config::load_from(args.config.as_deref()).context("Failed to load configuration")?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let _logging_guard =
        logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.logging.deployment_environment,
        "Starting Staybook server"
    );

    let addr = config
        .socket_addr()
        .context("Failed to determine socket address")?;

    let options = AppStateOptions {
        store: if args.memory {
            StoreKind::Memory
        } else {
            StoreKind::Postgres
        },
        run_migrations: args.skip_migrations.then_some(false),
    };
    let state = AppState::new_with_options(config, options)
        .await
        .context("Failed to initialize application state")?;

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {addr}"))?;

    tracing::info!("Staybook listening on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated unexpectedly")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::warn!(error = %e, "SIGTERM handler unavailable; relying on Ctrl+C");
            wait_for_ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("SIGINT received, starting graceful shutdown...");
        }
        _ = sigterm.recv() => {
            tracing::info!("SIGTERM received, starting graceful shutdown...");
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
