//! Database schema and queries for learnsmart-planning

pub mod activities;
pub mod modules;
pub mod plans;

use sqlx::SqlitePool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS learning_plans (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        goal_id TEXT,
        status TEXT NOT NULL DEFAULT 'active',
        start_date TEXT NOT NULL,
        end_date TEXT,
        hours_per_week REAL,
        generated_by TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_plans_user ON learning_plans(user_id, created_at)",
    r#"
    CREATE TABLE IF NOT EXISTS plan_modules (
        id TEXT PRIMARY KEY,
        plan_id TEXT NOT NULL REFERENCES learning_plans(id) ON DELETE CASCADE,
        position INTEGER NOT NULL,
        title TEXT NOT NULL,
        description TEXT,
        estimated_hours REAL,
        status TEXT NOT NULL DEFAULT 'pending',
        target_skills TEXT NOT NULL DEFAULT '[]',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_modules_plan ON plan_modules(plan_id, position)",
    r#"
    CREATE TABLE IF NOT EXISTS plan_activities (
        id TEXT PRIMARY KEY,
        module_id TEXT NOT NULL REFERENCES plan_modules(id) ON DELETE CASCADE,
        position INTEGER NOT NULL,
        activity_type TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        content_ref TEXT NOT NULL,
        estimated_minutes INTEGER,
        override_estimated_minutes INTEGER,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_activities_module ON plan_activities(module_id, position)",
];

/// Create planning tables if they don't exist
pub async fn init_tables(pool: &SqlitePool) -> learnsmart_common::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
