// ABOUTME: Database connection management and schema initialization
// ABOUTME: Opens the SQLite pool, applies pragmas, and runs embedded migrations

use std::path::PathBuf;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::{debug, info};

use crate::error::StoreResult;

/// Open the SQLite pool, creating the database file and schema on first run
pub async fn init_pool(database_path: Option<PathBuf>) -> StoreResult<SqlitePool> {
    let database_path = database_path.unwrap_or_else(drafter_core::database_file);

    // Ensure parent directory exists
    if let Some(parent) = database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database_url = format!("sqlite:{}?mode=rwc", database_path.display());

    debug!("Connecting to database: {}", database_url);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&database_url)
        .await?;

    // Configure SQLite settings
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
    sqlx::query("PRAGMA synchronous = NORMAL").execute(&pool).await?;

    info!("Database connection established");

    sqlx::migrate!("./migrations").run(&pool).await?;

    debug!("Database migrations completed");

    Ok(pool)
}
