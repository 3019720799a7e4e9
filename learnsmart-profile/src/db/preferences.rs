//! Study preference persistence

use learnsmart_common::db::row::{encode_string_list, get_string_list, get_uuid};
use learnsmart_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::StudyPreferences;

pub async fn load(pool: &SqlitePool, user_id: Uuid) -> Result<Option<StudyPreferences>> {
    let row = sqlx::query("SELECT * FROM user_study_preferences WHERE user_id = ?")
        .bind(user_id.to_string())
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(preferences_from_row).transpose()
}

/// Insert or replace the user's preferences
pub async fn save(pool: &SqlitePool, prefs: &StudyPreferences) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_study_preferences
            (user_id, hours_per_week, preferred_days, preferred_session_minutes, notifications_enabled)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            hours_per_week = excluded.hours_per_week,
            preferred_days = excluded.preferred_days,
            preferred_session_minutes = excluded.preferred_session_minutes,
            notifications_enabled = excluded.notifications_enabled
        "#,
    )
    .bind(prefs.user_id.to_string())
    .bind(prefs.hours_per_week)
    .bind(encode_string_list(&prefs.preferred_days))
    .bind(prefs.preferred_session_minutes)
    .bind(prefs.notifications_enabled)
    .execute(pool)
    .await?;
    Ok(())
}

fn preferences_from_row(row: &SqliteRow) -> Result<StudyPreferences> {
    Ok(StudyPreferences {
        user_id: get_uuid(row, "user_id")?,
        hours_per_week: row.try_get("hours_per_week")?,
        preferred_days: get_string_list(row, "preferred_days")?,
        preferred_session_minutes: row.try_get("preferred_session_minutes")?,
        notifications_enabled: row.try_get("notifications_enabled")?,
    })
}
