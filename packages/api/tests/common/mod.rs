// ABOUTME: Common test utilities for API integration tests
// ABOUTME: Provides test server setup, database helpers, and HTTP client utilities

use std::sync::Arc;

use axum::Router;
use drafter_api::{create_api_router, AppState};
use drafter_gateway::CompletionClient;
use sqlx::SqlitePool;

/// Test context containing server URL and database pool
pub struct TestContext {
    pub base_url: String,
    #[allow(dead_code)]
    pub pool: SqlitePool,
}

/// Create a test server with an isolated in-memory database and the given gateway
pub async fn setup_test_server_with_gateway(
    gateway: CompletionClient,
    chat_context_limit: usize,
) -> TestContext {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database pool");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::migrate!("../store/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let state = AppState::new(pool.clone(), Arc::new(gateway))
        .with_chat_context_limit(chat_context_limit);

    let app = Router::new().nest("/api", create_api_router()).with_state(state);

    // Bind to random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

    TestContext { base_url, pool }
}

/// Create a test server whose gateway is never expected to be reached
#[allow(dead_code)]
pub async fn setup_test_server() -> TestContext {
    let gateway = CompletionClient::with_api_key("test-key".to_string())
        .with_base_url("http://127.0.0.1:9/unreachable".to_string());
    setup_test_server_with_gateway(gateway, drafter_api::state::DEFAULT_CHAT_CONTEXT).await
}

/// Helper to make GET requests
pub async fn get(base_url: &str, path: &str) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .get(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make GET request")
}

/// Helper to make POST requests with JSON body
#[allow(dead_code)]
pub async fn post_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .post(format!("{}{}", base_url, path))
        .json(body)
        .send()
        .await
        .expect("Failed to make POST request")
}

/// Helper to make PUT requests with JSON body
#[allow(dead_code)]
pub async fn put_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .put(format!("{}{}", base_url, path))
        .json(body)
        .send()
        .await
        .expect("Failed to make PUT request")
}
