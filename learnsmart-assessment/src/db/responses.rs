//! User item responses (insert-only)

use learnsmart_common::db::row::{get_opt_uuid, get_timestamp, get_uuid};
use learnsmart_common::{time, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use crate::models::UserItemResponse;

pub async fn insert_response(conn: &mut SqliteConnection, response: &UserItemResponse) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_item_responses
            (id, session_id, user_id, assessment_item_id, selected_option_id,
             response_payload, is_correct, response_time_ms, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(response.id.to_string())
    .bind(response.session_id.to_string())
    .bind(response.user_id.to_string())
    .bind(response.assessment_item_id.to_string())
    .bind(response.selected_option_id.map(|id| id.to_string()))
    .bind(&response.response_payload)
    .bind(response.is_correct)
    .bind(response.response_time_ms)
    .bind(time::to_db(&response.created_at))
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Responses of one session in submission order
pub async fn list_for_session(conn: &mut SqliteConnection, session_id: Uuid) -> Result<Vec<UserItemResponse>> {
    let rows = sqlx::query(
        "SELECT * FROM user_item_responses WHERE session_id = ? ORDER BY created_at ASC, rowid ASC",
    )
    .bind(session_id.to_string())
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(response_from_row).collect()
}

fn response_from_row(row: &SqliteRow) -> Result<UserItemResponse> {
    Ok(UserItemResponse {
        id: get_uuid(row, "id")?,
        session_id: get_uuid(row, "session_id")?,
        user_id: get_uuid(row, "user_id")?,
        assessment_item_id: get_uuid(row, "assessment_item_id")?,
        selected_option_id: get_opt_uuid(row, "selected_option_id")?,
        response_payload: row.try_get("response_payload")?,
        is_correct: row.try_get("is_correct")?,
        response_time_ms: row.try_get("response_time_ms")?,
        created_at: get_timestamp(row, "created_at")?,
    })
}
