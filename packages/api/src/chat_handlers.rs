// ABOUTME: HTTP request handlers for chat-driven PRD generation and refinement
// ABOUTME: Bridges the store transcript and the completion gateway

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::response::{
    created_or_error, gateway_error_response, ok_or_error, store_error_response, validation_error,
};
use crate::state::AppState;
use drafter_gateway::{prompts, ChatTurn, Sampling};
use drafter_store::{chat, prds, ChatMessage, MessageRole, PrdStatus};

fn to_chat_turn(message: &ChatMessage) -> ChatTurn {
    match message.role {
        MessageRole::User => ChatTurn::user(message.content.clone()),
        MessageRole::Assistant => ChatTurn::assistant(message.content.clone()),
    }
}

/// Get the full chat transcript for a PRD
pub async fn get_chat(
    State(state): State<AppState>,
    Path(prd_id): Path<String>,
) -> impl IntoResponse {
    info!("Getting chat transcript for PRD: {}", prd_id);

    let result = chat::chat_history(&state.pool, &prd_id).await;
    ok_or_error(result, "Failed to get chat transcript")
}

/// Request body for a chat turn
#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

/// Send a refinement message about an existing PRD and return the reply
pub async fn send_message(
    State(state): State<AppState>,
    Path(prd_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> impl IntoResponse {
    info!("Chat message for PRD: {}", prd_id);

    if request.message.trim().is_empty() {
        return validation_error("Chat message must not be empty");
    }

    let prd = match prds::get_prd(&state.pool, &prd_id).await {
        Ok(prd) => prd,
        Err(e) => return store_error_response(e, "Failed to load PRD"),
    };

    // Context is bounded before it ever reaches the gateway
    let history =
        match chat::recent_chat_messages(&state.pool, &prd_id, state.chat_context_limit).await {
            Ok(messages) => messages,
            Err(e) => return store_error_response(e, "Failed to load chat context"),
        };
    let turns: Vec<ChatTurn> = history.iter().map(to_chat_turn).collect();

    if let Err(e) =
        chat::append_chat_message(&state.pool, &prd_id, MessageRole::User, &request.message).await
    {
        return store_error_response(e, "Failed to record chat message");
    }

    let reply = match state
        .gateway
        .generate(
            &prompts::refinement_system_prompt(&prd.content_markdown),
            &turns,
            &request.message,
            Sampling::REFINEMENT,
        )
        .await
    {
        Ok(reply) => reply,
        Err(e) => return gateway_error_response(e, "Completion request failed"),
    };

    let result = chat::append_chat_message(&state.pool, &prd_id, MessageRole::Assistant, &reply).await;
    ok_or_error(result, "Failed to record assistant reply")
}

/// Request body for generating a new PRD from a product idea
#[derive(Deserialize)]
pub struct GeneratePrdRequest {
    pub prompt: String,
    pub title: Option<String>,
}

/// Generate a new PRD from a product description via the gateway
pub async fn generate_prd(
    State(state): State<AppState>,
    Json(request): Json<GeneratePrdRequest>,
) -> impl IntoResponse {
    info!("Generating new PRD");

    if request.prompt.trim().is_empty() {
        return validation_error("Product description must not be empty");
    }

    let content = match state
        .gateway
        .generate(
            prompts::GENERATION_SYSTEM_PROMPT,
            &[],
            &prompts::generation_prompt(&request.prompt),
            Sampling::GENERATION,
        )
        .await
    {
        Ok(content) => content,
        Err(e) => return gateway_error_response(e, "PRD generation failed"),
    };

    let title = request
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| format!("PRD_{}", Utc::now().format("%Y%m%d_%H%M%S")));

    let prd = match prds::create_prd(&state.pool, &title, &content).await {
        Ok(prd) => prd,
        Err(e) => return store_error_response(e, "Failed to save generated PRD"),
    };

    // Seed the transcript so later refinement turns carry the origin
    if let Err(e) =
        chat::append_chat_message(&state.pool, &prd.id, MessageRole::User, &request.prompt).await
    {
        return store_error_response(e, "Failed to record chat message");
    }
    let ack = format!("Generated new PRD: {}", prd.title);
    if let Err(e) = chat::append_chat_message(&state.pool, &prd.id, MessageRole::Assistant, &ack).await
    {
        return store_error_response(e, "Failed to record chat message");
    }

    created_or_error(Ok(prd), "Failed to generate PRD")
}

/// Improvement suggestions for a PRD, grounded in approved exemplars
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    pub suggestions: String,
}

/// Suggest improvements to a PRD by comparing it against approved PRDs
pub async fn suggest_improvements(
    State(state): State<AppState>,
    Path(prd_id): Path<String>,
) -> impl IntoResponse {
    info!("Suggesting improvements for PRD: {}", prd_id);

    let prd = match prds::get_prd(&state.pool, &prd_id).await {
        Ok(prd) => prd,
        Err(e) => return store_error_response(e, "Failed to load PRD"),
    };

    let approved = match prds::list_prds(&state.pool, Some(PrdStatus::Approved)).await {
        Ok(prds) => prds,
        Err(e) => return store_error_response(e, "Failed to load approved PRDs"),
    };

    let exemplars: Vec<String> = approved
        .into_iter()
        .filter(|p| p.id != prd.id)
        .map(|p| p.content_markdown)
        .collect();

    if exemplars.is_empty() {
        return validation_error("No approved PRDs available for comparison");
    }

    let suggestions = match state
        .gateway
        .generate(
            &prompts::suggestion_system_prompt(&exemplars),
            &[],
            &prompts::suggestion_prompt(&prd.content_markdown),
            Sampling::SUGGESTION,
        )
        .await
    {
        Ok(suggestions) => suggestions,
        Err(e) => return gateway_error_response(e, "Suggestion request failed"),
    };

    ok_or_error(Ok(SuggestionsResponse { suggestions }), "Failed to suggest improvements")
}
