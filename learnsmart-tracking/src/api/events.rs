//! Learning event endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use learnsmart_common::api::{ApiResult, Page, PageQuery};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::events::EventFilter;
use crate::models::{LearningEvent, NewEvent};
use crate::services::events;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    pub user_id: Option<Uuid>,
    pub event_type: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<NewEvent>,
) -> ApiResult<(StatusCode, Json<LearningEvent>)> {
    let event = events::record_event(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /events?userId&eventType&entityType&entityId&from&to&page&size
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> ApiResult<Json<Page<LearningEvent>>> {
    let paging = PageQuery::from_parts(query.page, query.size);
    let filter = EventFilter {
        user_id: query.user_id,
        event_type: query.event_type,
        entity_type: query.entity_type,
        entity_id: query.entity_id,
        from: query.from,
        to: query.to,
    };
    Ok(Json(events::search_events(&state.db, &filter, &paging).await?))
}

pub fn event_routes() -> Router<AppState> {
    Router::new().route("/events", get(list_events).post(create_event))
}
