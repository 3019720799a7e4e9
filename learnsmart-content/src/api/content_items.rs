//! Content item endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use learnsmart_common::api::{ApiError, ApiResult, PageQuery};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::{self, content_items::ContentItemFilter};
use crate::models::{ContentItem, ContentItemInput, ContentItemUpdate, SkillWeight};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemQuery {
    pub domain_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub active: Option<bool>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl ContentItemQuery {
    fn paging(&self) -> PageQuery {
        PageQuery::from_parts(self.page, self.size)
    }
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Content item not found: {}", id))
}

/// POST /content-items
pub async fn create_content_item(
    State(state): State<AppState>,
    Json(input): Json<ContentItemInput>,
) -> ApiResult<(StatusCode, Json<ContentItem>)> {
    let item = db::content_items::create_content_item(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /content-items?domainId&type&active&page&size
pub async fn list_content_items(
    State(state): State<AppState>,
    Query(query): Query<ContentItemQuery>,
) -> ApiResult<Json<Vec<ContentItem>>> {
    let paging = query.paging();
    let filter = ContentItemFilter {
        domain_id: query.domain_id,
        item_type: query.item_type,
        active: query.active,
    };
    let items =
        db::content_items::list_content_items(&state.db, &filter, paging.size(), paging.offset()).await?;
    Ok(Json(items))
}

/// GET /content-items/:id
pub async fn get_content_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ContentItem>> {
    db::content_items::get_content_item(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// PUT /content-items/:id
pub async fn update_content_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<ContentItemUpdate>,
) -> ApiResult<Json<ContentItem>> {
    db::content_items::update_content_item(&state.db, id, update)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// DELETE /content-items/:id
pub async fn delete_content_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if db::content_items::delete_content_item(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /content-items/:id/skills
///
/// Replaces the item's skill associations and returns the updated item.
pub async fn set_content_item_skills(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(weights): Json<Vec<SkillWeight>>,
) -> ApiResult<Json<ContentItem>> {
    let item = db::content_items::set_skills(&state.db, id, weights).await?;
    Ok(Json(item))
}

pub fn content_item_routes() -> Router<AppState> {
    Router::new()
        .route("/content-items", get(list_content_items).post(create_content_item))
        .route(
            "/content-items/:id",
            get(get_content_item)
                .put(update_content_item)
                .delete(delete_content_item),
        )
        .route("/content-items/:id/skills", post(set_content_item_skills))
}
