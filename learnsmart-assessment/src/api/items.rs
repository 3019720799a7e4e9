//! Assessment item endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use learnsmart_common::api::{ApiError, ApiResult};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::{self, items::ItemFilter};
use crate::models::{AssessmentItem, NewItem};
use crate::services;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuery {
    pub domain_id: Option<Uuid>,
    pub origin: Option<String>,
}

/// POST /assessment-items
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<NewItem>,
) -> ApiResult<(StatusCode, Json<AssessmentItem>)> {
    let item = services::items::create_item(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /assessment-items?domainId&origin
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> ApiResult<Json<Vec<AssessmentItem>>> {
    let filter = ItemFilter {
        domain_id: query.domain_id,
        origin: query.origin,
    };
    let mut conn = state.db.acquire().await?;
    Ok(Json(db::items::list_items(&mut conn, &filter).await?))
}

/// GET /assessment-items/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<AssessmentItem>> {
    let mut conn = state.db.acquire().await?;
    db::items::load_item(&mut conn, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Assessment item not found: {}", id)))
}

pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/assessment-items", get(list_items).post(create_item))
        .route("/assessment-items/:id", get(get_item))
}
