//! Profile registration and lookup

use learnsmart_common::{time, uuid_utils};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::db;
use crate::error::{ProfileError, Result};
use crate::identity::Identity;
use crate::models::{NewProfile, ProfileUpdate, UserProfile};

fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProfileError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

/// Create a profile
///
/// `auth_user_id` is the caller's auth subject; a random one is assigned
/// when the request carries none.
pub async fn register(
    pool: &SqlitePool,
    auth_user_id: Option<String>,
    new: NewProfile,
) -> Result<UserProfile> {
    require(&new.email, "email")?;
    require(&new.display_name, "displayName")?;
    if !new.email.contains('@') {
        return Err(ProfileError::InvalidInput(format!("invalid email: {}", new.email)));
    }

    if db::profiles::find_by_email(pool, &new.email).await?.is_some() {
        return Err(ProfileError::EmailTaken(new.email));
    }

    let now = time::now();
    let profile = UserProfile {
        user_id: uuid_utils::generate(),
        auth_user_id: auth_user_id.unwrap_or_else(|| uuid_utils::generate().to_string()),
        email: new.email,
        display_name: new.display_name,
        birth_year: None,
        locale: new.locale,
        timezone: new.timezone,
        created_at: now,
        updated_at: now,
    };
    db::profiles::insert_profile(pool, &profile).await?;

    info!(user_id = %profile.user_id, auth_user_id = %profile.auth_user_id, "Registered profile");
    Ok(profile)
}

pub async fn get_profile(pool: &SqlitePool, user_id: Uuid) -> Result<UserProfile> {
    db::profiles::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| ProfileError::ProfileNotFound(user_id.to_string()))
}

/// The caller's own profile
pub async fn resolve(pool: &SqlitePool, identity: &Identity) -> Result<UserProfile> {
    let found = match identity {
        Identity::Auth(subject) => db::profiles::find_by_auth_id(pool, subject).await?,
        Identity::User(user_id) => db::profiles::find_by_id(pool, *user_id).await?,
    };
    found.ok_or_else(|| ProfileError::ProfileNotFound(identity.to_string()))
}

/// Apply the fields present in `update`
pub async fn update_profile(
    pool: &SqlitePool,
    identity: &Identity,
    update: ProfileUpdate,
) -> Result<UserProfile> {
    let mut profile = resolve(pool, identity).await?;

    if let Some(display_name) = update.display_name {
        require(&display_name, "displayName")?;
        profile.display_name = display_name;
    }
    if let Some(birth_year) = update.birth_year {
        profile.birth_year = Some(birth_year);
    }
    if let Some(locale) = update.locale {
        profile.locale = Some(locale);
    }
    if let Some(timezone) = update.timezone {
        profile.timezone = Some(timezone);
    }
    profile.updated_at = time::now();

    db::profiles::update_profile(pool, &profile).await?;
    Ok(profile)
}
