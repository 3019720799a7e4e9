//! Database schema and queries for learnsmart-profile

pub mod goals;
pub mod preferences;
pub mod profiles;

use sqlx::SqlitePool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS user_profiles (
        user_id TEXT PRIMARY KEY,
        auth_user_id TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        display_name TEXT NOT NULL,
        birth_year INTEGER,
        locale TEXT,
        timezone TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_goals (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES user_profiles(user_id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        description TEXT,
        domain TEXT,
        target_level TEXT,
        due_date TEXT,
        intensity TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_goals_user ON user_goals(user_id)",
    r#"
    CREATE TABLE IF NOT EXISTS user_study_preferences (
        user_id TEXT PRIMARY KEY REFERENCES user_profiles(user_id) ON DELETE CASCADE,
        hours_per_week REAL NOT NULL,
        preferred_days TEXT NOT NULL DEFAULT '[]',
        preferred_session_minutes INTEGER,
        notifications_enabled INTEGER NOT NULL DEFAULT 1
    )
    "#,
];

/// Create profile tables if they don't exist
pub async fn init_tables(pool: &SqlitePool) -> learnsmart_common::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
