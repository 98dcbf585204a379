// ABOUTME: Drafter server binary - wires config, store, gateway, API, and UI
// ABOUTME: Startup failures halt before the server binds; runtime errors surface per request

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

mod config;

use config::Config;
use drafter_api::AppState;
use drafter_gateway::CompletionClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let gateway = CompletionClient::from_env();
    if !gateway.has_api_key() {
        anyhow::bail!(
            "{} is not set; refusing to start without a completion API key",
            drafter_config::OPENAI_API_KEY
        );
    }

    let pool = drafter_store::init_pool(config.database_path.clone())
        .await
        .context("Failed to open database")?;

    let state = AppState::new(pool, Arc::new(gateway))
        .with_chat_context_limit(config.chat_context_limit);

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<axum::http::HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Static UI with the index page as SPA fallback
    let ui = ServeDir::new("public").not_found_service(ServeFile::new("public/index.html"));

    let app = Router::new()
        .nest("/api", drafter_api::create_api_router())
        .with_state(state)
        .fallback_service(ui)
        .layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Drafter listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
