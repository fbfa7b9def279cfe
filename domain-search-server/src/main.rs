//! domain-search-server binary: loads settings and serves the check endpoint.

use domain_search_lib::Settings;
use domain_search_server::{create_router, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("domain_search_server=info,domain_search_lib=info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let config_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let settings = Settings::load(config_path.as_deref())?;
    let addr: SocketAddr = settings.bind.parse()?;

    if settings.token.is_none() {
        tracing::warn!("no server token configured; requests are not authenticated");
    }
    tracing::info!(
        endpoint = %settings.resolver.endpoint,
        timeout = ?settings.resolver.timeout,
        "RDAP lookups configured"
    );

    let app = create_router(AppState::from_settings(&settings)?);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
