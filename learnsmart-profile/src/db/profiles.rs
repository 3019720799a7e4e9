//! Profile persistence

use learnsmart_common::db::row::{get_timestamp, get_uuid};
use learnsmart_common::{time, Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::UserProfile;

pub async fn insert_profile(pool: &SqlitePool, profile: &UserProfile) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_profiles
            (user_id, auth_user_id, email, display_name, birth_year, locale, timezone, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(profile.user_id.to_string())
    .bind(&profile.auth_user_id)
    .bind(&profile.email)
    .bind(&profile.display_name)
    .bind(profile.birth_year)
    .bind(&profile.locale)
    .bind(&profile.timezone)
    .bind(time::to_db(&profile.created_at))
    .bind(time::to_db(&profile.updated_at))
    .execute(pool)
    .await
    .map_err(|e| Error::on_unique_violation(e, "Profile already exists for this email or auth user"))?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, user_id: Uuid) -> Result<Option<UserProfile>> {
    let row = sqlx::query("SELECT * FROM user_profiles WHERE user_id = ?")
        .bind(user_id.to_string())
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(profile_from_row).transpose()
}

pub async fn find_by_auth_id(pool: &SqlitePool, auth_user_id: &str) -> Result<Option<UserProfile>> {
    let row = sqlx::query("SELECT * FROM user_profiles WHERE auth_user_id = ?")
        .bind(auth_user_id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(profile_from_row).transpose()
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<UserProfile>> {
    let row = sqlx::query("SELECT * FROM user_profiles WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(profile_from_row).transpose()
}

/// Write the mutable columns back
pub async fn update_profile(pool: &SqlitePool, profile: &UserProfile) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE user_profiles
        SET display_name = ?, birth_year = ?, locale = ?, timezone = ?, updated_at = ?
        WHERE user_id = ?
        "#,
    )
    .bind(&profile.display_name)
    .bind(profile.birth_year)
    .bind(&profile.locale)
    .bind(&profile.timezone)
    .bind(time::to_db(&profile.updated_at))
    .bind(profile.user_id.to_string())
    .execute(pool)
    .await?;
    Ok(())
}

fn profile_from_row(row: &SqliteRow) -> Result<UserProfile> {
    Ok(UserProfile {
        user_id: get_uuid(row, "user_id")?,
        auth_user_id: row.try_get("auth_user_id")?,
        email: row.try_get("email")?,
        display_name: row.try_get("display_name")?,
        birth_year: row.try_get("birth_year")?,
        locale: row.try_get("locale")?,
        timezone: row.try_get("timezone")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}
