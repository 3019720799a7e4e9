//! Plan activity rows

use learnsmart_common::db::row::{get_timestamp, get_uuid};
use learnsmart_common::{time, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use crate::models::PlanActivity;

pub async fn insert_activity(conn: &mut SqliteConnection, activity: &PlanActivity) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO plan_activities
            (id, module_id, position, activity_type, status, content_ref,
             estimated_minutes, override_estimated_minutes, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(activity.id.to_string())
    .bind(activity.module_id.to_string())
    .bind(activity.position)
    .bind(&activity.activity_type)
    .bind(&activity.status)
    .bind(&activity.content_ref)
    .bind(activity.estimated_minutes)
    .bind(activity.override_estimated_minutes)
    .bind(time::to_db(&activity.created_at))
    .bind(time::to_db(&activity.updated_at))
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn load_activity(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<PlanActivity>> {
    let row = sqlx::query("SELECT * FROM plan_activities WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(activity_from_row).transpose()
}

/// Activities of one module in position order
pub async fn list_for_module(conn: &mut SqliteConnection, module_id: Uuid) -> Result<Vec<PlanActivity>> {
    let rows = sqlx::query("SELECT * FROM plan_activities WHERE module_id = ? ORDER BY position")
        .bind(module_id.to_string())
        .fetch_all(&mut *conn)
        .await?;
    rows.iter().map(activity_from_row).collect()
}

/// Activities of every module of a plan, module order then activity order
pub async fn list_for_plan(conn: &mut SqliteConnection, plan_id: Uuid) -> Result<Vec<PlanActivity>> {
    let rows = sqlx::query(
        r#"
        SELECT a.* FROM plan_activities a
        JOIN plan_modules m ON m.id = a.module_id
        WHERE m.plan_id = ?
        ORDER BY m.position, a.position
        "#,
    )
    .bind(plan_id.to_string())
    .fetch_all(&mut *conn)
    .await?;
    rows.iter().map(activity_from_row).collect()
}

/// Set status and, when given, the override estimate
pub async fn update_activity(
    conn: &mut SqliteConnection,
    id: Uuid,
    status: &str,
    override_minutes: Option<i64>,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE plan_activities SET
            status = ?,
            override_estimated_minutes = COALESCE(?, override_estimated_minutes),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(status)
    .bind(override_minutes)
    .bind(time::to_db(&time::now()))
    .bind(id.to_string())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

fn activity_from_row(row: &SqliteRow) -> Result<PlanActivity> {
    Ok(PlanActivity {
        id: get_uuid(row, "id")?,
        module_id: get_uuid(row, "module_id")?,
        position: row.try_get("position")?,
        activity_type: row.try_get("activity_type")?,
        status: row.try_get("status")?,
        content_ref: row.try_get("content_ref")?,
        estimated_minutes: row.try_get("estimated_minutes")?,
        override_estimated_minutes: row.try_get("override_estimated_minutes")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}
