use std::sync::Arc;

use anyhow::{Context, Result};
use omdb_browse::api;
use omdb_browse::catalog::OmdbClient;
use omdb_browse::config::AppConfig;
use omdb_browse::session::{SessionSettings, spawn_session};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .pretty()
        .init();

    let config = AppConfig::from_env()?;
    info!(
        base_url = %config.base_url,
        bind_addr = %config.bind_addr,
        timeout_ms = config.request_timeout.as_millis() as u64,
        debounce_ms = config.debounce.as_millis() as u64,
        seeds = config.showcase_seeds.len(),
        "loaded configuration"
    );

    let catalog = Arc::new(OmdbClient::from_config(&config)?);
    let (session, session_task) =
        spawn_session(Arc::clone(&catalog), SessionSettings::from_config(&config));
    let app = api::router(api::AppState::new(session, catalog, config.theme));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "starting http server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    session_task.abort();
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
