//! Study preferences

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db;
use crate::error::{ProfileError, Result};
use crate::models::{PreferencesUpdate, StudyPreferences};

/// Stored preferences, or the defaults when none were saved
pub async fn get_preferences(pool: &SqlitePool, user_id: Uuid) -> Result<StudyPreferences> {
    Ok(db::preferences::load(pool, user_id)
        .await?
        .unwrap_or_else(|| StudyPreferences::defaults(user_id)))
}

/// Merge `update` into the current preferences and save
pub async fn update_preferences(
    pool: &SqlitePool,
    user_id: Uuid,
    update: PreferencesUpdate,
) -> Result<StudyPreferences> {
    let mut prefs = get_preferences(pool, user_id).await?;

    if let Some(hours) = update.hours_per_week {
        if !hours.is_finite() || hours < 0.0 {
            return Err(ProfileError::InvalidInput(format!(
                "hoursPerWeek must be non-negative, got {}",
                hours
            )));
        }
        prefs.hours_per_week = hours;
    }
    if let Some(days) = update.preferred_days {
        prefs.preferred_days = days;
    }
    if let Some(minutes) = update.preferred_session_minutes {
        if minutes <= 0 {
            return Err(ProfileError::InvalidInput(
                "preferredSessionMinutes must be positive".into(),
            ));
        }
        prefs.preferred_session_minutes = Some(minutes);
    }
    if let Some(enabled) = update.notifications_enabled {
        prefs.notifications_enabled = enabled;
    }

    db::preferences::save(pool, &prefs).await?;
    Ok(prefs)
}
