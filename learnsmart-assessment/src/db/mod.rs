//! Database schema and queries for learnsmart-assessment

pub mod items;
pub mod mastery;
pub mod responses;
pub mod sessions;

use sqlx::SqlitePool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS assessment_items (
        id TEXT PRIMARY KEY,
        domain_id TEXT NOT NULL,
        origin TEXT NOT NULL DEFAULT 'static',
        item_type TEXT NOT NULL,
        stem TEXT NOT NULL,
        difficulty REAL,
        metadata TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_items_domain ON assessment_items(domain_id)",
    r#"
    CREATE TABLE IF NOT EXISTS assessment_item_options (
        id TEXT PRIMARY KEY,
        assessment_item_id TEXT NOT NULL REFERENCES assessment_items(id) ON DELETE CASCADE,
        position INTEGER NOT NULL,
        label TEXT,
        statement TEXT NOT NULL,
        is_correct INTEGER NOT NULL DEFAULT 0,
        error_tag TEXT,
        feedback_template TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_options_item ON assessment_item_options(assessment_item_id)",
    r#"
    CREATE TABLE IF NOT EXISTS assessment_item_skills (
        assessment_item_id TEXT NOT NULL REFERENCES assessment_items(id) ON DELETE CASCADE,
        skill_id TEXT NOT NULL,
        weight REAL NOT NULL DEFAULT 1.0,
        PRIMARY KEY (assessment_item_id, skill_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS assessment_sessions (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        session_type TEXT NOT NULL,
        status TEXT NOT NULL,
        plan_id TEXT,
        module_id TEXT,
        config TEXT,
        started_at TEXT NOT NULL,
        completed_at TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_sessions_user ON assessment_sessions(user_id)",
    r#"
    CREATE TABLE IF NOT EXISTS user_item_responses (
        id TEXT PRIMARY KEY,
        session_id TEXT NOT NULL REFERENCES assessment_sessions(id),
        user_id TEXT NOT NULL,
        assessment_item_id TEXT NOT NULL REFERENCES assessment_items(id),
        selected_option_id TEXT,
        response_payload TEXT,
        is_correct INTEGER NOT NULL,
        response_time_ms INTEGER,
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_responses_session ON user_item_responses(session_id)",
    r#"
    CREATE TABLE IF NOT EXISTS user_skill_mastery (
        user_id TEXT NOT NULL,
        skill_id TEXT NOT NULL,
        mastery REAL NOT NULL,
        attempts INTEGER NOT NULL DEFAULT 0,
        last_update TEXT NOT NULL,
        PRIMARY KEY (user_id, skill_id)
    )
    "#,
];

/// Create assessment tables if they don't exist
pub async fn init_tables(pool: &SqlitePool) -> learnsmart_common::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
