//! LandWatch Monitor: live alert counters for the land-monitoring console.
//!
//! Wires the source adapters, watermark store, and alert engine together,
//! then logs counter changes until shutdown.

use tracing_subscriber::{EnvFilter, fmt};

use landwatch_core::config::AppConfig;
use landwatch_core::error::AppError;
use landwatch_realtime::AlertEngine;

#[tokio::main]
async fn main() {
    let env = std::env::var("LANDWATCH_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Monitor error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting LandWatch Monitor v{}", env!("CARGO_PKG_VERSION"));

    let engine = AlertEngine::from_config(&config).await?;
    engine.start().await?;

    let stats = engine.get_stats().await;
    tracing::info!(
        total = stats.total,
        satellite = stats.satellite,
        community = stats.community,
        system = stats.system,
        high_priority = stats.high_priority,
        new = stats.new_alerts,
        "Current alert stats"
    );

    let mut states = engine.subscribe_state();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received");
                break;
            }
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                match serde_json::to_string(&state.visit_state()) {
                    Ok(visit) => tracing::info!(
                        total = state.total_alerts,
                        new = state.new_alerts,
                        unvisited = state.unvisited_alerts,
                        visit = %visit,
                        "Notification counters updated"
                    ),
                    Err(e) => tracing::warn!("Failed to serialize visit state: {e}"),
                }
            }
        }
    }

    engine.shutdown().await;
    tracing::info!("LandWatch Monitor stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
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
                tracing::error!("Failed to install SIGTERM handler: {e}");
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
}
