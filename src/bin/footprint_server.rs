//! # Food Footprint Server
//!
//! Runs the HTTP front door and the background batch worker.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin footprint-server
//!
//! # Run with specific environment
//! FOOTPRINT_ENV=production cargo run --bin footprint-server
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use food_footprint::config::ConfigManager;
use food_footprint::logging;
use food_footprint::orchestration::OrchestrationSystemHandle;
use food_footprint::web::{self, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_structured_logging();

    info!("Starting Food Footprint Server...");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));

    let config_manager = ConfigManager::load().context("failed to load configuration")?;
    info!("   Environment: {}", config_manager.environment());

    let system = OrchestrationSystemHandle::bootstrap(config_manager.clone())
        .await
        .context("failed to bootstrap orchestration")?;

    let web_config = config_manager.config().web.clone();
    let app = web::create_app(AppState::new(system.scheduler.clone(), web_config.clone()));

    let listener = TcpListener::bind(&web_config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", web_config.bind_address))?;

    info!("Food Footprint Server listening on {}", web_config.bind_address);
    info!("   Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Shutdown signal received, draining accepted batches...");

    let OrchestrationSystemHandle {
        scheduler, worker, ..
    } = system;
    drop(scheduler);
    if let Err(e) = worker.await {
        error!("Batch worker terminated abnormally: {}", e);
    }

    info!("Food Footprint Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
