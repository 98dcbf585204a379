// ABOUTME: Shared application state threaded through API handlers
// ABOUTME: Carries the database pool, gateway client, and chat context bound

use std::sync::Arc;

use drafter_gateway::CompletionClient;
use sqlx::SqlitePool;

/// Default number of recent chat messages sent to the gateway as context
pub const DEFAULT_CHAT_CONTEXT: usize = 10;

/// Per-request context for API handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub gateway: Arc<CompletionClient>,
    /// Upper bound on transcript messages forwarded to the gateway
    pub chat_context_limit: usize,
}

impl AppState {
    pub fn new(pool: SqlitePool, gateway: Arc<CompletionClient>) -> Self {
        Self {
            pool,
            gateway,
            chat_context_limit: DEFAULT_CHAT_CONTEXT,
        }
    }

    pub fn with_chat_context_limit(mut self, limit: usize) -> Self {
        self.chat_context_limit = limit;
        self
    }
}
