//! Assessment session persistence

use chrono::{DateTime, Utc};
use learnsmart_common::db::row::{get_opt_timestamp, get_opt_uuid, get_timestamp, get_uuid};
use learnsmart_common::{time, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use crate::models::AssessmentSession;

pub async fn insert_session(conn: &mut SqliteConnection, session: &AssessmentSession) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO assessment_sessions
            (id, user_id, session_type, status, plan_id, module_id, config, started_at, completed_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(session.id.to_string())
    .bind(session.user_id.to_string())
    .bind(&session.session_type)
    .bind(&session.status)
    .bind(session.plan_id.map(|id| id.to_string()))
    .bind(session.module_id.map(|id| id.to_string()))
    .bind(&session.config)
    .bind(time::to_db(&session.started_at))
    .bind(session.completed_at.as_ref().map(time::to_db))
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn load_session(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<AssessmentSession>> {
    let row = sqlx::query("SELECT * FROM assessment_sessions WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(session_from_row).transpose()
}

/// Set the status; `completed_at` is written only when provided
///
/// Returns false when the session does not exist.
pub async fn update_status(
    conn: &mut SqliteConnection,
    id: Uuid,
    status: &str,
    completed_at: Option<DateTime<Utc>>,
) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE assessment_sessions SET status = ?, completed_at = COALESCE(?, completed_at) WHERE id = ?",
    )
    .bind(status)
    .bind(completed_at.as_ref().map(time::to_db))
    .bind(id.to_string())
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

fn session_from_row(row: &SqliteRow) -> Result<AssessmentSession> {
    Ok(AssessmentSession {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        session_type: row.try_get("session_type")?,
        status: row.try_get("status")?,
        plan_id: get_opt_uuid(row, "plan_id")?,
        module_id: get_opt_uuid(row, "module_id")?,
        config: row.try_get("config")?,
        started_at: get_timestamp(row, "started_at")?,
        completed_at: get_opt_timestamp(row, "completed_at")?,
    })
}
