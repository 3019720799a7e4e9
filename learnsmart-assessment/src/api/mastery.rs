//! Skill mastery endpoint

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use learnsmart_common::api::types::SkillMasteryEnriched;
use learnsmart_common::api::ApiResult;
use uuid::Uuid;

use crate::db;
use crate::services::enrich_masteries;
use crate::AppState;

/// GET /users/:user_id/skill-mastery
///
/// Highest mastery first, with names from content-service.
pub async fn get_skill_mastery(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<SkillMasteryEnriched>>> {
    let records = {
        let mut conn = state.db.acquire().await?;
        db::mastery::list_for_user(&mut conn, user_id).await?
    };

    Ok(Json(enrich_masteries(state.content.as_ref(), records).await))
}

pub fn mastery_routes() -> Router<AppState> {
    Router::new().route("/users/:user_id/skill-mastery", get(get_skill_mastery))
}
