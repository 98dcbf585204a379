// ABOUTME: HTTP API layer for Drafter providing REST endpoints and routing
// ABOUTME: Assembles handlers for PRD management, chat, export, and health

use axum::{
    routing::{get, post},
    Router,
};

pub mod chat_handlers;
pub mod export_handlers;
pub mod health;
pub mod prd_handlers;
pub mod response;
pub mod state;

pub use state::AppState;

/// Creates the PRD API router (nested under /api/prds)
pub fn create_prds_router() -> Router<AppState> {
    Router::new()
        .route("/", get(prd_handlers::list_prds))
        .route("/", post(prd_handlers::create_prd))
        .route("/generate", post(chat_handlers::generate_prd))
        .route("/export", get(export_handlers::export_all_prds))
        .route(
            "/{prd_id}",
            get(prd_handlers::get_prd)
                .put(prd_handlers::save_prd)
                .delete(prd_handlers::delete_prd),
        )
        .route("/{prd_id}/approve", post(prd_handlers::approve_prd))
        .route("/{prd_id}/versions", get(prd_handlers::list_versions))
        .route("/{prd_id}/revert", post(prd_handlers::revert_prd))
        .route(
            "/{prd_id}/chat",
            get(chat_handlers::get_chat).post(chat_handlers::send_message),
        )
        .route("/{prd_id}/suggest", post(chat_handlers::suggest_improvements))
        .route("/{prd_id}/export", get(export_handlers::export_prd))
}

/// Creates the full API router (nested under /api)
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/status", get(health::status_check))
        .nest("/prds", create_prds_router())
}
