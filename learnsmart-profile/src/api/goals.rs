//! Goal endpoints for the caller's profile

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use learnsmart_common::api::ApiResult;
use uuid::Uuid;

use crate::identity::Identity;
use crate::models::{GoalUpdate, NewGoal, UserGoal};
use crate::services::{goals, profiles};
use crate::AppState;

/// GET /profiles/me/goals
pub async fn list_goals(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Json<Vec<UserGoal>>> {
    let profile = profiles::resolve(&state.db, &identity).await?;
    Ok(Json(goals::list_goals(&state.db, profile.user_id).await?))
}

/// POST /profiles/me/goals
pub async fn create_goal(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<UserGoal>)> {
    let profile = profiles::resolve(&state.db, &identity).await?;
    let goal = goals::create_goal(&state.db, profile.user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// PUT /profiles/me/goals/:goal_id
pub async fn update_goal(
    State(state): State<AppState>,
    identity: Identity,
    Path(goal_id): Path<Uuid>,
    Json(payload): Json<GoalUpdate>,
) -> ApiResult<Json<UserGoal>> {
    let profile = profiles::resolve(&state.db, &identity).await?;
    Ok(Json(
        goals::update_goal(&state.db, profile.user_id, goal_id, payload).await?,
    ))
}

/// DELETE /profiles/me/goals/:goal_id
pub async fn delete_goal(
    State(state): State<AppState>,
    identity: Identity,
    Path(goal_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let profile = profiles::resolve(&state.db, &identity).await?;
    goals::delete_goal(&state.db, profile.user_id, goal_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn goal_routes() -> Router<AppState> {
    Router::new()
        .route("/profiles/me/goals", get(list_goals).post(create_goal))
        .route("/profiles/me/goals/:goal_id", put(update_goal).delete(delete_goal))
}
