//! Study preference endpoints

use axum::{extract::State, routing::get, Json, Router};
use learnsmart_common::api::ApiResult;

use crate::identity::Identity;
use crate::models::{PreferencesUpdate, StudyPreferences};
use crate::services::{preferences, profiles};
use crate::AppState;

/// GET /profiles/me/preferences
pub async fn get_preferences(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Json<StudyPreferences>> {
    let profile = profiles::resolve(&state.db, &identity).await?;
    Ok(Json(preferences::get_preferences(&state.db, profile.user_id).await?))
}

/// PUT /profiles/me/preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<PreferencesUpdate>,
) -> ApiResult<Json<StudyPreferences>> {
    let profile = profiles::resolve(&state.db, &identity).await?;
    Ok(Json(
        preferences::update_preferences(&state.db, profile.user_id, payload).await?,
    ))
}

pub fn preference_routes() -> Router<AppState> {
    Router::new().route(
        "/profiles/me/preferences",
        get(get_preferences).put(update_preferences),
    )
}
