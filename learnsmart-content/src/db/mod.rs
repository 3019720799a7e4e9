//! Database schema and queries for learnsmart-content

pub mod content_items;
pub mod domains;
pub mod skills;

use sqlx::SqlitePool;

/// Create catalog tables if they don't exist
pub async fn init_tables(pool: &SqlitePool) -> learnsmart_common::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS domains (
            id TEXT PRIMARY KEY,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS skills (
            id TEXT PRIMARY KEY,
            domain_id TEXT NOT NULL REFERENCES domains(id),
            code TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            level TEXT,
            tags TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL,
            UNIQUE (domain_id, code)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS content_items (
            id TEXT PRIMARY KEY,
            domain_id TEXT NOT NULL REFERENCES domains(id),
            type TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            estimated_minutes INTEGER,
            difficulty REAL,
            metadata TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS content_item_skills (
            content_item_id TEXT NOT NULL REFERENCES content_items(id) ON DELETE CASCADE,
            skill_id TEXT NOT NULL REFERENCES skills(id),
            weight REAL NOT NULL,
            PRIMARY KEY (content_item_id, skill_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
