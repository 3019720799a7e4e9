//! learnsmart-content library
//!
//! Catalog of learning domains, the skills they contain and the content
//! items that teach those skills.

use axum::Router;
use learnsmart_common::api::health_routes;
use learnsmart_common::config::Service;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod models;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::domain_routes())
        .merge(api::skill_routes())
        .merge(api::content_item_routes())
        .merge(health_routes(Service::Content, env!("CARGO_PKG_VERSION")))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
