// Proxy entry point - Dependency injection and server setup
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use weather_dashboard::application::proxy_service::ProxyService;
use weather_dashboard::infrastructure::config::load_proxy_config;
use weather_dashboard::infrastructure::openweather_client::OpenWeatherClient;
use weather_dashboard::presentation::app_state::AppState;
use weather_dashboard::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may carry RUST_LOG as well as the API key
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_proxy_config()?;

    // Upstream provider (infrastructure layer)
    let provider = Arc::new(OpenWeatherClient::new(
        config.upstream.base_url.clone(),
        config.upstream.api_key.clone(),
        config.upstream.timeout(),
    )?);

    // Proxy use case (application layer)
    let state = Arc::new(AppState {
        proxy_service: ProxyService::new(provider),
    });

    let router = build_router(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Starting weather proxy on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
