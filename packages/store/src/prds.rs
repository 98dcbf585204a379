// ABOUTME: Database operations for PRD entities and their version history
// ABOUTME: Provides create, save, revert, approve, and list operations with soft delete support

use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite, Transaction};

use crate::error::{StoreError, StoreResult};
use crate::types::{Prd, PrdCounts, PrdStatus, PrdVersion};

/// Maximum size for markdown content fields (1MB)
const MAX_MARKDOWN_SIZE: usize = 1024 * 1024;

/// Validate markdown content size
fn validate_content_size(content: &str, field_name: &str) -> StoreResult<()> {
    if content.len() > MAX_MARKDOWN_SIZE {
        return Err(StoreError::InvalidInput(format!(
            "{} exceeds maximum size of {} bytes (got {} bytes)",
            field_name,
            MAX_MARKDOWN_SIZE,
            content.len()
        )));
    }
    Ok(())
}

/// Append a snapshot row for an existing PRD. Caller owns the transaction.
async fn insert_version_row(
    tx: &mut Transaction<'_, Sqlite>,
    prd_id: &str,
    version: i32,
    content_markdown: &str,
    created_at: DateTime<Utc>,
) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO prd_versions (id, prd_id, version, content_markdown, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(drafter_core::generate_id())
    .bind(prd_id)
    .bind(version)
    .bind(content_markdown)
    .bind(created_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Create a new PRD with its first version snapshot
pub async fn create_prd(pool: &Pool<Sqlite>, title: &str, content_markdown: &str) -> StoreResult<Prd> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::InvalidInput(
            "PRD title must not be empty".to_string(),
        ));
    }
    validate_content_size(content_markdown, "PRD content")?;

    let id = drafter_core::generate_id();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let prd = sqlx::query_as::<_, Prd>(
        r#"
        INSERT INTO prds (id, title, content_markdown, version, status, created_at, updated_at)
        VALUES (?, ?, ?, 1, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&id)
    .bind(title)
    .bind(content_markdown)
    .bind(PrdStatus::Draft)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    insert_version_row(&mut tx, &id, 1, content_markdown, now).await?;

    tx.commit().await?;

    Ok(prd)
}

/// Get a PRD by ID
pub async fn get_prd(pool: &Pool<Sqlite>, id: &str) -> StoreResult<Prd> {
    sqlx::query_as::<_, Prd>("SELECT * FROM prds WHERE id = ? AND deleted_at IS NULL")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("PRD not found: {}", id)))
}

/// Get all PRDs, most recently updated first, optionally filtered by status
pub async fn list_prds(pool: &Pool<Sqlite>, status: Option<PrdStatus>) -> StoreResult<Vec<Prd>> {
    let prds = if let Some(status) = status {
        sqlx::query_as::<_, Prd>(
            "SELECT * FROM prds WHERE status = ? AND deleted_at IS NULL ORDER BY updated_at DESC",
        )
        .bind(status)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, Prd>(
            "SELECT * FROM prds WHERE deleted_at IS NULL ORDER BY updated_at DESC",
        )
        .fetch_all(pool)
        .await?
    };

    Ok(prds)
}

/// Save new content for a PRD, appending the next version snapshot.
/// Fails without writing anything when the PRD id is unknown.
pub async fn save_version(
    pool: &Pool<Sqlite>,
    prd_id: &str,
    content_markdown: &str,
) -> StoreResult<Prd> {
    validate_content_size(content_markdown, "PRD content")?;

    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let prd = sqlx::query_as::<_, Prd>(
        r#"
        UPDATE prds
        SET content_markdown = ?, version = version + 1, updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(content_markdown)
    .bind(now)
    .bind(prd_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| StoreError::NotFound(format!("PRD not found: {}", prd_id)))?;

    insert_version_row(&mut tx, prd_id, prd.version, content_markdown, now).await?;

    tx.commit().await?;

    Ok(prd)
}

/// Get all version snapshots of a PRD in sequence order
pub async fn list_versions(pool: &Pool<Sqlite>, prd_id: &str) -> StoreResult<Vec<PrdVersion>> {
    // Surface a NotFound for unknown PRDs rather than an empty history
    get_prd(pool, prd_id).await?;

    let versions = sqlx::query_as::<_, PrdVersion>(
        "SELECT * FROM prd_versions WHERE prd_id = ? ORDER BY version ASC",
    )
    .bind(prd_id)
    .fetch_all(pool)
    .await?;

    Ok(versions)
}

/// Copy a snapshot's content back into the PRD's current content.
/// History is never rewritten; the revert lands as a new version.
pub async fn revert_prd(pool: &Pool<Sqlite>, prd_id: &str, version_id: &str) -> StoreResult<Prd> {
    let snapshot = sqlx::query_as::<_, PrdVersion>(
        "SELECT * FROM prd_versions WHERE id = ? AND prd_id = ?",
    )
    .bind(version_id)
    .bind(prd_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| {
        StoreError::NotFound(format!("Version not found: {} for PRD {}", version_id, prd_id))
    })?;

    save_version(pool, prd_id, &snapshot.content_markdown).await
}

/// Mark a PRD as approved. Idempotent; there is no un-approval path.
pub async fn approve_prd(pool: &Pool<Sqlite>, prd_id: &str) -> StoreResult<Prd> {
    let now = Utc::now();

    sqlx::query_as::<_, Prd>(
        r#"
        UPDATE prds
        SET status = ?, updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(PrdStatus::Approved)
    .bind(now)
    .bind(prd_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::NotFound(format!("PRD not found: {}", prd_id)))
}

/// Soft delete a PRD
pub async fn delete_prd(pool: &Pool<Sqlite>, prd_id: &str) -> StoreResult<()> {
    let now = Utc::now();
    let result = sqlx::query("UPDATE prds SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
        .bind(now)
        .bind(prd_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(format!("PRD not found: {}", prd_id)));
    }

    Ok(())
}

/// Count stored PRDs by status
pub async fn prd_counts(pool: &Pool<Sqlite>) -> StoreResult<PrdCounts> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prds WHERE deleted_at IS NULL")
        .fetch_one(pool)
        .await?;

    let approved: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM prds WHERE status = 'approved' AND deleted_at IS NULL",
    )
    .fetch_one(pool)
    .await?;

    Ok(PrdCounts {
        total,
        approved,
        draft: total - approved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_db() -> Pool<Sqlite> {
        let pool = Pool::<Sqlite>::connect(":memory:").await.unwrap();

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    #[tokio::test]
    async fn test_create_and_get_prd() {
        let pool = setup_test_db().await;

        let prd = create_prd(&pool, "Test PRD", "# Test Content").await.unwrap();

        assert_eq!(prd.title, "Test PRD");
        assert_eq!(prd.version, 1);
        assert_eq!(prd.status, PrdStatus::Draft);

        let fetched = get_prd(&pool, &prd.id).await.unwrap();
        assert_eq!(fetched.id, prd.id);
        assert_eq!(fetched.content_markdown, "# Test Content");
    }

    #[tokio::test]
    async fn test_create_prd_rejects_empty_title() {
        let pool = setup_test_db().await;

        let result = create_prd(&pool, "   ", "content").await;
        assert!(matches!(result.unwrap_err(), StoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_save_version_unknown_prd_writes_nothing() {
        let pool = setup_test_db().await;

        let result = save_version(&pool, "missing", "content").await;
        assert!(matches!(result.unwrap_err(), StoreError::NotFound(_)));

        let version_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prd_versions")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(version_count, 0);
    }

    #[tokio::test]
    async fn test_version_numbers_gapless_from_one() {
        let pool = setup_test_db().await;

        let prd = create_prd(&pool, "Versioned", "v1").await.unwrap();
        save_version(&pool, &prd.id, "v2").await.unwrap();
        save_version(&pool, &prd.id, "v3").await.unwrap();

        let versions = list_versions(&pool, &prd.id).await.unwrap();
        let numbers: Vec<i32> = versions.iter().map(|v| v.version).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_revert_appends_new_version_with_old_content() {
        let pool = setup_test_db().await;

        let prd = create_prd(&pool, "Revertable", "original").await.unwrap();
        save_version(&pool, &prd.id, "edited").await.unwrap();

        let versions = list_versions(&pool, &prd.id).await.unwrap();
        let first = &versions[0];

        let reverted = revert_prd(&pool, &prd.id, &first.id).await.unwrap();
        assert_eq!(reverted.content_markdown, "original");
        assert_eq!(reverted.version, 3);

        let versions = list_versions(&pool, &prd.id).await.unwrap();
        assert_eq!(versions.len(), 3);
        assert_eq!(versions.last().unwrap().content_markdown, "original");
    }

    #[tokio::test]
    async fn test_approval_survives_saves() {
        let pool = setup_test_db().await;

        let prd = create_prd(&pool, "Approvable", "v1").await.unwrap();
        let approved = approve_prd(&pool, &prd.id).await.unwrap();
        assert_eq!(approved.status, PrdStatus::Approved);

        // Idempotent
        let again = approve_prd(&pool, &prd.id).await.unwrap();
        assert_eq!(again.status, PrdStatus::Approved);

        let saved = save_version(&pool, &prd.id, "v2").await.unwrap();
        assert_eq!(saved.status, PrdStatus::Approved);
    }

    #[tokio::test]
    async fn test_list_prds_excludes_deleted_and_filters_status() {
        let pool = setup_test_db().await;

        let kept = create_prd(&pool, "Kept", "a").await.unwrap();
        let gone = create_prd(&pool, "Gone", "b").await.unwrap();
        delete_prd(&pool, &gone.id).await.unwrap();
        approve_prd(&pool, &kept.id).await.unwrap();

        let all = list_prds(&pool, None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, kept.id);

        let approved = list_prds(&pool, Some(PrdStatus::Approved)).await.unwrap();
        assert_eq!(approved.len(), 1);

        let drafts = list_prds(&pool, Some(PrdStatus::Draft)).await.unwrap();
        assert!(drafts.is_empty());

        let counts = prd_counts(&pool).await.unwrap();
        assert_eq!(counts.total, 1);
        assert_eq!(counts.approved, 1);
        assert_eq!(counts.draft, 0);
    }

    #[tokio::test]
    async fn test_save_revert_scenario() {
        let pool = setup_test_db().await;

        let prd = create_prd(&pool, "Login Flow", "v1").await.unwrap();
        save_version(&pool, &prd.id, "v2").await.unwrap();

        let versions = list_versions(&pool, &prd.id).await.unwrap();
        let contents: Vec<&str> = versions.iter().map(|v| v.content_markdown.as_str()).collect();
        assert_eq!(contents, vec!["v1", "v2"]);

        let v1 = versions.iter().find(|v| v.version == 1).unwrap();
        revert_prd(&pool, &prd.id, &v1.id).await.unwrap();

        let current = get_prd(&pool, &prd.id).await.unwrap();
        assert_eq!(current.content_markdown, "v1");
    }
}
