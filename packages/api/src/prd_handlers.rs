// ABOUTME: HTTP request handlers for PRD operations
// ABOUTME: Handles CRUD, version history, revert, and approval endpoints

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::response::{created_or_error, ok_or_error};
use crate::state::AppState;
use drafter_store::{prds, PrdStatus};

/// Query parameters for listing PRDs
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    status: Option<String>,
}

/// List all PRDs, optionally filtered by status
pub async fn list_prds(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("Listing PRDs (status: {:?})", query.status);

    let status = match query.status.as_deref() {
        Some("draft") => Some(PrdStatus::Draft),
        Some("approved") => Some(PrdStatus::Approved),
        Some(other) => {
            warn!("Ignoring invalid status filter: {}", other);
            None
        }
        None => None,
    };

    let result = prds::list_prds(&state.pool, status).await;
    ok_or_error(result, "Failed to list PRDs")
}

/// Request body for creating a PRD manually
#[derive(Deserialize)]
pub struct CreatePrdRequest {
    pub title: String,
    #[serde(rename = "contentMarkdown")]
    pub content_markdown: String,
}

/// Create a new PRD with user-supplied content
pub async fn create_prd(
    State(state): State<AppState>,
    Json(request): Json<CreatePrdRequest>,
) -> impl IntoResponse {
    info!("Creating PRD '{}'", request.title);

    let result = prds::create_prd(&state.pool, &request.title, &request.content_markdown).await;
    created_or_error(result, "Failed to create PRD")
}

/// Get a single PRD by ID
pub async fn get_prd(
    State(state): State<AppState>,
    Path(prd_id): Path<String>,
) -> impl IntoResponse {
    info!("Getting PRD: {}", prd_id);

    let result = prds::get_prd(&state.pool, &prd_id).await;
    ok_or_error(result, "Failed to get PRD")
}

/// Request body for the explicit save action
#[derive(Deserialize)]
pub struct SavePrdRequest {
    #[serde(rename = "contentMarkdown")]
    pub content_markdown: String,
}

/// Save new content for a PRD, appending a version snapshot
pub async fn save_prd(
    State(state): State<AppState>,
    Path(prd_id): Path<String>,
    Json(request): Json<SavePrdRequest>,
) -> impl IntoResponse {
    info!("Saving version for PRD: {}", prd_id);

    let result = prds::save_version(&state.pool, &prd_id, &request.content_markdown).await;
    ok_or_error(result, "Failed to save PRD version")
}

/// Soft delete a PRD
pub async fn delete_prd(
    State(state): State<AppState>,
    Path(prd_id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting PRD: {}", prd_id);

    let result = prds::delete_prd(&state.pool, &prd_id).await;
    ok_or_error(result, "Failed to delete PRD")
}

/// Mark a PRD as approved (idempotent)
pub async fn approve_prd(
    State(state): State<AppState>,
    Path(prd_id): Path<String>,
) -> impl IntoResponse {
    info!("Approving PRD: {}", prd_id);

    let result = prds::approve_prd(&state.pool, &prd_id).await;
    ok_or_error(result, "Failed to approve PRD")
}

/// List all version snapshots for a PRD in sequence order
pub async fn list_versions(
    State(state): State<AppState>,
    Path(prd_id): Path<String>,
) -> impl IntoResponse {
    info!("Listing versions for PRD: {}", prd_id);

    let result = prds::list_versions(&state.pool, &prd_id).await;
    ok_or_error(result, "Failed to list PRD versions")
}

/// Request body for reverting to a previous version
#[derive(Deserialize)]
pub struct RevertRequest {
    #[serde(rename = "versionId")]
    pub version_id: String,
}

/// Revert a PRD's current content to a previous snapshot
pub async fn revert_prd(
    State(state): State<AppState>,
    Path(prd_id): Path<String>,
    Json(request): Json<RevertRequest>,
) -> impl IntoResponse {
    info!("Reverting PRD {} to version {}", prd_id, request.version_id);

    let result = prds::revert_prd(&state.pool, &prd_id, &request.version_id).await;
    ok_or_error(result, "Failed to revert PRD")
}
