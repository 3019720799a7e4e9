//! learnsmart-profile library
//!
//! Learner profiles, goals and study preferences, plus the progress view
//! that combines them with planning, assessment and tracking data.

use axum::Router;
use learnsmart_common::api::health_routes;
use learnsmart_common::config::Service;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod identity;
pub mod models;
pub mod services;

pub use error::ProfileError;
use services::Collaborators;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub collaborators: Collaborators,
}

impl AppState {
    pub fn new(db: SqlitePool, collaborators: Collaborators) -> Self {
        Self { db, collaborators }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::profile_routes())
        .merge(api::goal_routes())
        .merge(api::preference_routes())
        .merge(api::progress_routes())
        .merge(health_routes(Service::Profile, env!("CARGO_PKG_VERSION")))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
