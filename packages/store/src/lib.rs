// ABOUTME: Drafter store library - SQLite persistence for PRDs, versions, and chat
// ABOUTME: Provides pool initialization, schema migration, and CRUD operations

pub mod chat;
pub mod db;
pub mod error;
pub mod prds;
pub mod types;

pub use db::init_pool;
pub use error::{StoreError, StoreResult};
pub use types::{ChatMessage, MessageRole, Prd, PrdCounts, PrdStatus, PrdVersion};
