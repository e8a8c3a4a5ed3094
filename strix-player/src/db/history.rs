//! Watch-history and favorites persistence
//!
//! Resume positions are keyed by content id. `update_history` upserts the
//! latest position with a fresh `last_watched_at`; finished content is
//! removed outright by the persistence layer.

use async_trait::async_trait;
use sqlx::{Pool, Sqlite};
use strix_common::types::MediaKind;
use tracing::debug;

use crate::error::Result;
use crate::stores::CatalogStore;

/// Create the history/favorites tables if they do not exist
pub async fn init_schema(db: &Pool<Sqlite>) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS watch_history (
            content_id INTEGER PRIMARY KEY,
            media_kind TEXT NOT NULL,
            position_ms INTEGER NOT NULL,
            duration_ms INTEGER NOT NULL,
            last_watched_at TEXT NOT NULL
        )
        "#,
    )
    .execute(db)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS favorites (
            content_id INTEGER NOT NULL,
            media_kind TEXT NOT NULL,
            PRIMARY KEY (content_id, media_kind)
        )
        "#,
    )
    .execute(db)
    .await?;

    Ok(())
}

/// `CatalogStore` backed by the app's SQLite catalog database
#[derive(Clone)]
pub struct SqliteCatalogStore {
    db: Pool<Sqlite>,
}

impl SqliteCatalogStore {
    pub fn new(db: Pool<Sqlite>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn update_history(
        &self,
        content_id: i64,
        kind: MediaKind,
        position_ms: u64,
        duration_ms: u64,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO watch_history (content_id, media_kind, position_ms, duration_ms, last_watched_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(content_id) DO UPDATE SET
                media_kind = excluded.media_kind,
                position_ms = excluded.position_ms,
                duration_ms = excluded.duration_ms,
                last_watched_at = excluded.last_watched_at
            "#,
        )
        .bind(content_id)
        .bind(kind.as_str())
        .bind(position_ms as i64)
        .bind(duration_ms as i64)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.db)
        .await?;
        debug!(content_id, position_ms, "history position saved");
        Ok(())
    }

    async fn remove_from_history(&self, content_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM watch_history WHERE content_id = ?")
            .bind(content_id)
            .execute(&self.db)
            .await?;
        debug!(content_id, "history entry removed");
        Ok(())
    }

    async fn resume_position(&self, content_id: i64) -> Result<Option<u64>> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT position_ms FROM watch_history WHERE content_id = ?")
                .bind(content_id)
                .fetch_optional(&self.db)
                .await?;
        Ok(row.map(|(position_ms,)| position_ms.max(0) as u64))
    }

    async fn is_favorite(&self, content_id: i64, kind: MediaKind) -> Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT 1 FROM favorites WHERE content_id = ? AND media_kind = ?",
        )
        .bind(content_id)
        .bind(kind.as_str())
        .fetch_optional(&self.db)
        .await?;
        Ok(row.is_some())
    }

    async fn add_favorite(&self, content_id: i64, kind: MediaKind) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO favorites (content_id, media_kind) VALUES (?, ?)")
            .bind(content_id)
            .bind(kind.as_str())
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn remove_favorite(&self, content_id: i64, kind: MediaKind) -> Result<()> {
        sqlx::query("DELETE FROM favorites WHERE content_id = ? AND media_kind = ?")
            .bind(content_id)
            .bind(kind.as_str())
            .execute(&self.db)
            .await?;
        Ok(())
    }
}
