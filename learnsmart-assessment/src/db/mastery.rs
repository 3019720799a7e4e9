//! User skill mastery rows keyed by (user, skill)

use learnsmart_common::db::row::{get_timestamp, get_uuid};
use learnsmart_common::{time, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use crate::models::UserSkillMastery;

pub async fn load(conn: &mut SqliteConnection, user_id: Uuid, skill_id: Uuid) -> Result<Option<UserSkillMastery>> {
    let row = sqlx::query("SELECT * FROM user_skill_mastery WHERE user_id = ? AND skill_id = ?")
        .bind(user_id.to_string())
        .bind(skill_id.to_string())
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(mastery_from_row).transpose()
}

/// Insert or overwrite the row for (user, skill)
pub async fn save(conn: &mut SqliteConnection, record: &UserSkillMastery) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_skill_mastery (user_id, skill_id, mastery, attempts, last_update)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(user_id, skill_id) DO UPDATE SET
            mastery = excluded.mastery,
            attempts = excluded.attempts,
            last_update = excluded.last_update
        "#,
    )
    .bind(record.user_id.to_string())
    .bind(record.skill_id.to_string())
    .bind(record.mastery)
    .bind(record.attempts)
    .bind(time::to_db(&record.last_update))
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// All mastery rows of a user, highest mastery first
pub async fn list_for_user(conn: &mut SqliteConnection, user_id: Uuid) -> Result<Vec<UserSkillMastery>> {
    let rows = sqlx::query(
        "SELECT * FROM user_skill_mastery WHERE user_id = ? ORDER BY mastery DESC, skill_id ASC",
    )
    .bind(user_id.to_string())
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(mastery_from_row).collect()
}

fn mastery_from_row(row: &SqliteRow) -> Result<UserSkillMastery> {
    Ok(UserSkillMastery {
        user_id: get_uuid(row, "user_id")?,
        skill_id: get_uuid(row, "skill_id")?,
        mastery: row.try_get("mastery")?,
        attempts: row.try_get("attempts")?,
        last_update: get_timestamp(row, "last_update")?,
    })
}
