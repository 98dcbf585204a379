// ABOUTME: Chat transcript storage for PRD refinement conversations
// ABOUTME: Handles message persistence, ordering, and bounded history retrieval

use chrono::Utc;
use sqlx::{Pool, Sqlite};
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::prds::get_prd;
use crate::types::{ChatMessage, MessageRole};

/// Append a message to a PRD's transcript, assigning the next order number
pub async fn append_chat_message(
    pool: &Pool<Sqlite>,
    prd_id: &str,
    role: MessageRole,
    content: &str,
) -> StoreResult<ChatMessage> {
    if content.trim().is_empty() {
        return Err(StoreError::InvalidInput(
            "Chat message must not be empty".to_string(),
        ));
    }

    // Reject messages for unknown or deleted PRDs before touching the transcript
    get_prd(pool, prd_id).await?;

    info!("Appending {:?} message to PRD: {}", role, prd_id);

    let message_order: i32 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(message_order), -1) + 1 FROM chat_messages WHERE prd_id = ?",
    )
    .bind(prd_id)
    .fetch_one(pool)
    .await?;

    let message = sqlx::query_as::<_, ChatMessage>(
        r#"
        INSERT INTO chat_messages (id, prd_id, message_order, role, content, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(drafter_core::generate_id())
    .bind(prd_id)
    .bind(message_order)
    .bind(&role)
    .bind(content)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(message)
}

/// Get a PRD's full transcript in time order
pub async fn chat_history(pool: &Pool<Sqlite>, prd_id: &str) -> StoreResult<Vec<ChatMessage>> {
    get_prd(pool, prd_id).await?;

    let messages = sqlx::query_as::<_, ChatMessage>(
        "SELECT * FROM chat_messages WHERE prd_id = ? ORDER BY message_order ASC",
    )
    .bind(prd_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Get the most recent `limit` messages in time order, for LLM context
pub async fn recent_chat_messages(
    pool: &Pool<Sqlite>,
    prd_id: &str,
    limit: usize,
) -> StoreResult<Vec<ChatMessage>> {
    let mut messages = sqlx::query_as::<_, ChatMessage>(
        "SELECT * FROM chat_messages WHERE prd_id = ? ORDER BY message_order DESC LIMIT ?",
    )
    .bind(prd_id)
    .bind(limit as i64)
    .fetch_all(pool)
    .await?;

    messages.reverse();
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prds::create_prd;

    async fn setup_test_db() -> Pool<Sqlite> {
        let pool = Pool::<Sqlite>::connect(":memory:").await.unwrap();

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    #[tokio::test]
    async fn test_append_and_read_back_in_order() {
        let pool = setup_test_db().await;
        let prd = create_prd(&pool, "Chatty", "content").await.unwrap();

        append_chat_message(&pool, &prd.id, MessageRole::User, "hello")
            .await
            .unwrap();
        append_chat_message(&pool, &prd.id, MessageRole::Assistant, "hi there")
            .await
            .unwrap();

        let history = chat_history(&pool, &prd.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[0].message_order, 0);
        assert_eq!(history[1].role, MessageRole::Assistant);
        assert_eq!(history[1].message_order, 1);
    }

    #[tokio::test]
    async fn test_append_unknown_prd_fails() {
        let pool = setup_test_db().await;

        let result = append_chat_message(&pool, "missing", MessageRole::User, "hello").await;
        assert!(matches!(result.unwrap_err(), StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_recent_messages_bounded_and_chronological() {
        let pool = setup_test_db().await;
        let prd = create_prd(&pool, "Busy", "content").await.unwrap();

        for i in 0..7 {
            append_chat_message(&pool, &prd.id, MessageRole::User, &format!("msg {}", i))
                .await
                .unwrap();
        }

        let recent = recent_chat_messages(&pool, &prd.id, 3).await.unwrap();
        assert_eq!(recent.len(), 3);
        let contents: Vec<&str> = recent.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["msg 4", "msg 5", "msg 6"]);
    }
}
