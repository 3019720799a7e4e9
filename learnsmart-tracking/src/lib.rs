//! learnsmart-tracking library
//!
//! Append-only store of learning events plus the per-user statistics
//! derived from them.

use axum::Router;
use learnsmart_common::api::health_routes;
use learnsmart_common::config::Service;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod models;
pub mod services;

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
        .merge(api::event_routes())
        .merge(api::analytics_routes())
        .merge(health_routes(Service::Tracking, env!("CARGO_PKG_VERSION")))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
