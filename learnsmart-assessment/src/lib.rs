//! learnsmart-assessment library
//!
//! Diagnostic items, assessment sessions, response grading and per-skill
//! mastery tracking.

use axum::Router;
use learnsmart_common::api::health_routes;
use learnsmart_common::config::Service;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use error::AssessmentError;
use services::ContentClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Skill name lookups for mastery listings
    pub content: Arc<dyn ContentClient>,
}

impl AppState {
    pub fn new(db: SqlitePool, content: Arc<dyn ContentClient>) -> Self {
        Self { db, content }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::item_routes())
        .merge(api::session_routes())
        .merge(api::mastery_routes())
        .merge(health_routes(Service::Assessment, env!("CARGO_PKG_VERSION")))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
