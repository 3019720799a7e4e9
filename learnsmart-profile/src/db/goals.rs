//! Goal persistence

use learnsmart_common::db::row::{get_opt_date, get_timestamp, get_uuid};
use learnsmart_common::{time, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::UserGoal;

pub async fn insert_goal(pool: &SqlitePool, goal: &UserGoal) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_goals
            (id, user_id, title, description, domain, target_level, due_date, intensity,
             is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(goal.id.to_string())
    .bind(goal.user_id.to_string())
    .bind(&goal.title)
    .bind(&goal.description)
    .bind(&goal.domain)
    .bind(&goal.target_level)
    .bind(goal.due_date.as_ref().map(time::date_to_db))
    .bind(&goal.intensity)
    .bind(goal.is_active)
    .bind(time::to_db(&goal.created_at))
    .bind(time::to_db(&goal.updated_at))
    .execute(pool)
    .await?;
    Ok(())
}

/// A goal, only if it belongs to `user_id`
pub async fn find_owned(pool: &SqlitePool, user_id: Uuid, goal_id: Uuid) -> Result<Option<UserGoal>> {
    let row = sqlx::query("SELECT * FROM user_goals WHERE id = ? AND user_id = ?")
        .bind(goal_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(goal_from_row).transpose()
}

/// A user's goals, oldest first
pub async fn list_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<UserGoal>> {
    let rows = sqlx::query("SELECT * FROM user_goals WHERE user_id = ? ORDER BY created_at, rowid")
        .bind(user_id.to_string())
        .fetch_all(pool)
        .await?;
    rows.iter().map(goal_from_row).collect()
}

pub async fn update_goal(pool: &SqlitePool, goal: &UserGoal) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE user_goals
        SET title = ?, description = ?, domain = ?, target_level = ?, due_date = ?,
            intensity = ?, is_active = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&goal.title)
    .bind(&goal.description)
    .bind(&goal.domain)
    .bind(&goal.target_level)
    .bind(goal.due_date.as_ref().map(time::date_to_db))
    .bind(&goal.intensity)
    .bind(goal.is_active)
    .bind(time::to_db(&goal.updated_at))
    .bind(goal.id.to_string())
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns false when nothing matched
pub async fn delete_owned(pool: &SqlitePool, user_id: Uuid, goal_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM user_goals WHERE id = ? AND user_id = ?")
        .bind(goal_id.to_string())
        .bind(user_id.to_string())
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

fn goal_from_row(row: &SqliteRow) -> Result<UserGoal> {
    Ok(UserGoal {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        domain: row.try_get("domain")?,
        target_level: row.try_get("target_level")?,
        due_date: get_opt_date(row, "due_date")?,
        intensity: row.try_get("intensity")?,
        is_active: row.try_get("is_active")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}
