mod handlers;
mod middleware;
mod settings;
mod urls;

use crate::settings::Settings;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub struct AppState {
    pub settings: Settings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present, before flags fall back to the environment
    dotenvy::dotenv().ok();

    let settings = Settings::parse().validate()?;

    let default_filter = if settings.debug {
        "debug,tower_http=debug"
    } else {
        "info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if settings.debug {
        tracing::warn!("DEBUG MODE ENABLED - do not run this configuration in production");
    }
    if settings.allows_any_host() {
        tracing::info!("Host header validation disabled (ALLOWED_HOSTS=*)");
    }
    tracing::info!(
        static_url = %settings.static_url,
        static_root = %settings.static_root,
        cors_allow_all_origins = settings.cors_allow_all_origins,
        "Settings loaded"
    );

    let addr = settings.bind_addr();
    let app = urls::router(Arc::new(AppState { settings }));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
