//! Profile endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use learnsmart_common::api::ApiResult;
use uuid::Uuid;

use crate::identity::{AuthSubject, Identity};
use crate::models::{NewProfile, ProfileUpdate, UserProfile};
use crate::services::profiles;
use crate::AppState;

/// POST /profiles
pub async fn create_profile(
    State(state): State<AppState>,
    AuthSubject(subject): AuthSubject,
    Json(payload): Json<NewProfile>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let profile = profiles::register(&state.db, subject, payload).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /profiles/me
pub async fn get_my_profile(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(profiles::resolve(&state.db, &identity).await?))
}

/// PUT /profiles/me
pub async fn update_my_profile(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<ProfileUpdate>,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(profiles::update_profile(&state.db, &identity, payload).await?))
}

/// GET /profiles/:user_id
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(profiles::get_profile(&state.db, user_id).await?))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profiles", post(create_profile))
        .route("/profiles/me", get(get_my_profile).put(update_my_profile))
        .route("/profiles/:user_id", get(get_profile))
}
