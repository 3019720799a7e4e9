//! Plan module rows

use learnsmart_common::db::row::{encode_string_list, get_string_list, get_timestamp, get_uuid};
use learnsmart_common::{time, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use crate::models::PlanModule;

pub async fn insert_module(conn: &mut SqliteConnection, module: &PlanModule) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO plan_modules
            (id, plan_id, position, title, description, estimated_hours, status, target_skills, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(module.id.to_string())
    .bind(module.plan_id.to_string())
    .bind(module.position)
    .bind(&module.title)
    .bind(&module.description)
    .bind(module.estimated_hours)
    .bind(&module.status)
    .bind(encode_string_list(&module.target_skills))
    .bind(time::to_db(&module.created_at))
    .bind(time::to_db(&module.updated_at))
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn load_module(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<PlanModule>> {
    let row = sqlx::query("SELECT * FROM plan_modules WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(module_from_row).transpose()
}

/// Modules of a plan in position order
pub async fn list_for_plan(conn: &mut SqliteConnection, plan_id: Uuid) -> Result<Vec<PlanModule>> {
    let rows = sqlx::query("SELECT * FROM plan_modules WHERE plan_id = ? ORDER BY position")
        .bind(plan_id.to_string())
        .fetch_all(&mut *conn)
        .await?;
    rows.iter().map(module_from_row).collect()
}

pub async fn update_status(conn: &mut SqliteConnection, id: Uuid, status: &str) -> Result<()> {
    sqlx::query("UPDATE plan_modules SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(time::to_db(&time::now()))
        .bind(id.to_string())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

fn module_from_row(row: &SqliteRow) -> Result<PlanModule> {
    Ok(PlanModule {
        id: get_uuid(row, "id")?,
        plan_id: get_uuid(row, "plan_id")?,
        position: row.try_get("position")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        estimated_hours: row.try_get("estimated_hours")?,
        status: row.try_get("status")?,
        target_skills: get_string_list(row, "target_skills")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}
