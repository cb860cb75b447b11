//! Downstream slow service
//!
//! Main entry point for the HTTP API server.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use infrastructure::{AppConfig, init_tracing};
use presentation_http::{AppState, SERVICE_NAME, routes, server};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration; invalid values abort startup
    let config = AppConfig::load()?;

    init_tracing(&config.telemetry, config.server.log_format)?;

    info!("🐢 {} v{} starting...", SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = config.server.port,
        default_delay = config.faults.default_delay,
        max_delay = config.faults.max_delay,
        failure_rate = config.faults.failure_rate,
        seeded = config.faults.seed.is_some(),
        "Configuration loaded"
    );

    let addr = config.server.bind_address();
    let drain_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let cors_layer = cors_layer(&config.server.allowed_origins);

    let state = AppState::from_config(config)?;

    // Add middleware (order matters: first added = outermost)
    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);
    info!("📚 API docs: http://{}/docs", addr);

    server::serve(listener, app, shutdown_signal(), drain_timeout).await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// CORS for the configured origins; any origin when none are configured
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring unparseable CORS origin");
                None
            },
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
