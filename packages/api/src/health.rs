// ABOUTME: Health and status endpoints for the Drafter API
// ABOUTME: Liveness probe plus document-store tallies for the settings view

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::response::store_error_response;
use crate::state::AppState;
use drafter_store::prds;

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": unix_timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "drafter"
    }))
}

/// Health plus PRD counts and the active model
pub async fn status_check(State(state): State<AppState>) -> impl IntoResponse {
    let counts = match prds::prd_counts(&state.pool).await {
        Ok(counts) => counts,
        Err(e) => return store_error_response(e, "Failed to read PRD counts"),
    };

    Json(json!({
        "status": "healthy",
        "timestamp": unix_timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "drafter",
        "model": state.gateway.model(),
        "prds": counts
    }))
    .into_response()
}
