//! Learning plan endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use learnsmart_common::api::{ApiResult, Page, PageQuery};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::plans::PlanFilter;
use crate::models::{NewPlan, PlanDetail, PlanUpdate};
use crate::services::plans;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanQuery {
    pub user_id: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// POST /plans
pub async fn create_plan(
    State(state): State<AppState>,
    Json(payload): Json<NewPlan>,
) -> ApiResult<(StatusCode, Json<PlanDetail>)> {
    let plan = plans::create_plan(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /plans?userId&status&page&size
pub async fn list_plans(
    State(state): State<AppState>,
    Query(query): Query<PlanQuery>,
) -> ApiResult<Json<Page<PlanDetail>>> {
    let paging = PageQuery::from_parts(query.page, query.size);
    let filter = PlanFilter {
        user_id: query.user_id,
        status: query.status,
    };
    Ok(Json(plans::list_plans(&state.db, &filter, &paging).await?))
}

/// GET /plans/:id
pub async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PlanDetail>> {
    Ok(Json(plans::get_plan(&state.db, id).await?))
}

/// PUT /plans/:id
pub async fn update_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PlanUpdate>,
) -> ApiResult<Json<PlanDetail>> {
    Ok(Json(plans::update_plan(&state.db, id, payload).await?))
}

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/plans", get(list_plans).post(create_plan))
        .route("/plans/:id", get(get_plan).put(update_plan))
}
