//! Module and activity endpoints nested under a plan

use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Json, Router,
};
use learnsmart_common::api::ApiResult;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{ActivityUpdate, ModuleStatusUpdate, PlanActivity, PlanModule};
use crate::services::plans;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityQuery {
    pub module_id: Option<Uuid>,
}

/// GET /plans/:id/modules
pub async fn list_modules(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
) -> ApiResult<Json<Vec<PlanModule>>> {
    Ok(Json(plans::list_modules(&state.db, plan_id).await?))
}

/// PATCH /plans/:id/modules/:module_id
pub async fn update_module(
    State(state): State<AppState>,
    Path((plan_id, module_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ModuleStatusUpdate>,
) -> ApiResult<Json<PlanModule>> {
    let module = plans::update_module_status(&state.db, plan_id, module_id, &payload.status).await?;
    Ok(Json(module))
}

/// GET /plans/:id/activities?moduleId
pub async fn list_activities(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
    Query(query): Query<ActivityQuery>,
) -> ApiResult<Json<Vec<PlanActivity>>> {
    Ok(Json(plans::list_activities(&state.db, plan_id, query.module_id).await?))
}

/// PATCH /plans/:id/activities/:activity_id
pub async fn update_activity(
    State(state): State<AppState>,
    Path((plan_id, activity_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ActivityUpdate>,
) -> ApiResult<Json<PlanActivity>> {
    Ok(Json(plans::update_activity(&state.db, plan_id, activity_id, payload).await?))
}

pub fn module_routes() -> Router<AppState> {
    Router::new()
        .route("/plans/:id/modules", get(list_modules))
        .route("/plans/:id/modules/:module_id", patch(update_module))
        .route("/plans/:id/activities", get(list_activities))
        .route("/plans/:id/activities/:activity_id", patch(update_activity))
}
