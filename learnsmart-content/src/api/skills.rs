//! Skill endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use learnsmart_common::api::{ApiError, ApiResult, PageQuery};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::{self, skills::SkillFilter};
use crate::models::{Skill, SkillInput};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillQuery {
    pub domain_id: Option<Uuid>,
    pub code: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl SkillQuery {
    fn paging(&self) -> PageQuery {
        PageQuery::from_parts(self.page, self.size)
    }
}

/// POST /skills
pub async fn create_skill(
    State(state): State<AppState>,
    Json(input): Json<SkillInput>,
) -> ApiResult<(StatusCode, Json<Skill>)> {
    let skill = db::skills::create_skill(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(skill)))
}

/// GET /skills?domainId&code&page&size
pub async fn list_skills(
    State(state): State<AppState>,
    Query(query): Query<SkillQuery>,
) -> ApiResult<Json<Vec<Skill>>> {
    let paging = query.paging();
    let filter = SkillFilter {
        domain_id: query.domain_id,
        code: query.code,
    };
    let skills = db::skills::list_skills(&state.db, &filter, paging.size(), paging.offset()).await?;
    Ok(Json(skills))
}

/// GET /skills/:id
///
/// Consumed by assessment-service to label mastery rows.
pub async fn get_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Skill>> {
    db::skills::get_skill(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Skill not found: {}", id)))
}

pub fn skill_routes() -> Router<AppState> {
    Router::new()
        .route("/skills", get(list_skills).post(create_skill))
        .route("/skills/:id", get(get_skill))
}
