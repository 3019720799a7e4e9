//! Per-user statistics endpoints

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use learnsmart_common::api::types::UserStats;
use learnsmart_common::api::ApiResult;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::DailyActivity;
use crate::services::analytics;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// GET /analytics/users/:user_id/stats
pub async fn user_stats(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<UserStats>> {
    Ok(Json(analytics::user_stats(&state.db, user_id).await?))
}

/// GET /analytics/users/:user_id/activity?from&to
pub async fn user_activity(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ActivityQuery>,
) -> ApiResult<Json<Vec<DailyActivity>>> {
    let activity = analytics::user_activity(&state.db, user_id, query.from, query.to).await?;
    Ok(Json(activity))
}

pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/users/:user_id/stats", get(user_stats))
        .route("/analytics/users/:user_id/activity", get(user_activity))
}
