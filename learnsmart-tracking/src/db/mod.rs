//! Database schema and queries for learnsmart-tracking

pub mod events;

use sqlx::SqlitePool;

/// Create event tables if they don't exist
pub async fn init_tables(pool: &SqlitePool) -> learnsmart_common::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS learning_events (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            event_type TEXT NOT NULL,
            entity_type TEXT,
            entity_id TEXT,
            occurred_at TEXT NOT NULL,
            payload TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_events_user_time ON learning_events(user_id, occurred_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
