//! Domain endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use learnsmart_common::api::{ApiError, ApiResult, PageQuery};
use serde::Deserialize;
use uuid::Uuid;

use crate::db;
use crate::models::{Domain, DomainInput};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DomainQuery {
    pub code: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl DomainQuery {
    fn paging(&self) -> PageQuery {
        PageQuery::from_parts(self.page, self.size)
    }
}

/// POST /domains
pub async fn create_domain(
    State(state): State<AppState>,
    Json(input): Json<DomainInput>,
) -> ApiResult<(StatusCode, Json<Domain>)> {
    let domain = db::domains::create_domain(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(domain)))
}

/// GET /domains?code
pub async fn list_domains(
    State(state): State<AppState>,
    Query(query): Query<DomainQuery>,
) -> ApiResult<Json<Vec<Domain>>> {
    let paging = query.paging();
    let domains =
        db::domains::list_domains(&state.db, query.code.as_deref(), paging.size(), paging.offset())
            .await?;
    Ok(Json(domains))
}

/// GET /domains/:id
pub async fn get_domain(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Domain>> {
    db::domains::get_domain(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Domain not found: {}", id)))
}

pub fn domain_routes() -> Router<AppState> {
    Router::new()
        .route("/domains", get(list_domains).post(create_domain))
        .route("/domains/:id", get(get_domain))
}
