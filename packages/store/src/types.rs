// ABOUTME: Type definitions for PRDs, version snapshots, and chat messages
// ABOUTME: Structures mapped to the SQLite schema via sqlx

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a PRD. Transitions only draft -> approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PrdStatus {
    Draft,
    Approved,
}

impl std::fmt::Display for PrdStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrdStatus::Draft => write!(f, "draft"),
            PrdStatus::Approved => write!(f, "approved"),
        }
    }
}

/// Role of a chat message sender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A Product Requirements Document with its current content
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Prd {
    pub id: String,
    pub title: String,
    pub content_markdown: String,
    /// Sequence number of the latest version snapshot
    pub version: i32,
    pub status: PrdStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// An immutable content snapshot of a PRD at a point in time
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PrdVersion {
    pub id: String,
    pub prd_id: String,
    pub version: i32,
    pub content_markdown: String,
    pub created_at: DateTime<Utc>,
}

/// A message in a PRD's chat transcript
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub prd_id: String,
    pub message_order: i32,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Tallies of stored PRDs by status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrdCounts {
    pub total: i64,
    pub approved: i64,
    pub draft: i64,
}
