// ABOUTME: HTTP request handlers for PRD text export
// ABOUTME: Serves single and bulk downloads as plain-text attachments

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::info;

use crate::response::store_error_response;
use crate::state::AppState;
use drafter_store::prds;

/// Keep exported filenames shell- and header-safe
fn sanitize_filename(title: &str) -> String {
    title
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

fn text_attachment(file_name: String, content: String) -> Response {
    (
        [
            (
                header::CONTENT_TYPE,
                "text/plain; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        content,
    )
        .into_response()
}

/// Download a PRD's current content as a text file
pub async fn export_prd(
    State(state): State<AppState>,
    Path(prd_id): Path<String>,
) -> impl IntoResponse {
    info!("Exporting PRD: {}", prd_id);

    let prd = match prds::get_prd(&state.pool, &prd_id).await {
        Ok(prd) => prd,
        Err(e) => return store_error_response(e, "Failed to export PRD"),
    };

    let file_name = format!("{}_PRD.txt", sanitize_filename(&prd.title));
    text_attachment(file_name, prd.content_markdown)
}

/// Download every PRD concatenated into one text file
pub async fn export_all_prds(State(state): State<AppState>) -> impl IntoResponse {
    info!("Exporting all PRDs");

    let all = match prds::list_prds(&state.pool, None).await {
        Ok(prds) => prds,
        Err(e) => return store_error_response(e, "Failed to export PRDs"),
    };

    let banner = "=".repeat(50);
    let mut export = String::new();
    for prd in &all {
        export.push_str(&format!(
            "\n{}\nTITLE: {}\nVERSION: {}\nSTATUS: {}\nCREATED: {}\n{}\n\n",
            banner, prd.title, prd.version, prd.status, prd.created_at, banner
        ));
        export.push_str(&prd.content_markdown);
        export.push_str("\n\n");
    }

    let file_name = format!("all_prds_{}.txt", Utc::now().format("%Y%m%d_%H%M%S"));
    text_attachment(file_name, export)
}
