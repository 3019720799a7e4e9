//! Consolidated progress endpoint

use axum::{extract::State, routing::get, Json, Router};
use learnsmart_common::api::ApiResult;

use crate::identity::Identity;
use crate::models::ProgressView;
use crate::services::collect_progress;
use crate::AppState;

/// GET /profiles/me/progress
///
/// Always 200 for an existing profile; sections whose collaborator failed
/// are left out.
pub async fn get_my_progress(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Json<ProgressView>> {
    Ok(Json(
        collect_progress(&state.db, &state.collaborators, &identity).await?,
    ))
}

pub fn progress_routes() -> Router<AppState> {
    Router::new().route("/profiles/me/progress", get(get_my_progress))
}
