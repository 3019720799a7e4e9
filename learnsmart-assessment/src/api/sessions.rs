//! Assessment session endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use learnsmart_common::api::ApiResult;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{
    AssessmentItem, AssessmentSession, GradedResponse, NewSession, SubmitResponseRequest,
    UserItemResponse,
};
use crate::services::sessions;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub status: String,
}

/// POST /assessments/sessions
pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<NewSession>,
) -> ApiResult<(StatusCode, Json<AssessmentSession>)> {
    let session = sessions::start_session(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /assessments/sessions/:id
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<AssessmentSession>> {
    Ok(Json(sessions::get_session(&state.db, id).await?))
}

/// PUT /assessments/sessions/:id/status?status=
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Json<AssessmentSession>> {
    Ok(Json(sessions::update_status(&state.db, id, &query.status).await?))
}

/// GET /assessments/sessions/:id/next-item
pub async fn next_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<AssessmentItem>> {
    Ok(Json(sessions::next_item(&state.db, id).await?))
}

/// POST /assessments/sessions/:id/responses
///
/// Returns the stored response, its feedback and every mastery row the
/// submission touched.
pub async fn submit_response(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitResponseRequest>,
) -> ApiResult<Json<GradedResponse>> {
    Ok(Json(sessions::submit_response(&state.db, id, payload).await?))
}

/// GET /assessments/sessions/:id/responses
pub async fn list_responses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<UserItemResponse>>> {
    Ok(Json(sessions::list_responses(&state.db, id).await?))
}

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/assessments/sessions", post(create_session))
        .route("/assessments/sessions/:id", get(get_session))
        .route("/assessments/sessions/:id/status", put(update_status))
        .route("/assessments/sessions/:id/next-item", get(next_item))
        .route(
            "/assessments/sessions/:id/responses",
            get(list_responses).post(submit_response),
        )
}
