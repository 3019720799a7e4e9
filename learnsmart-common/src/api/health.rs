//! Health check endpoint

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::config::Service;

/// Health check response: status, module name, and version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// Build `GET /health` for a service
///
/// `version` is the calling crate's `CARGO_PKG_VERSION`.
pub fn health_routes<S>(service: Service, version: &'static str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/health",
        get(move || async move {
            Json(HealthResponse {
                status: "ok".to_string(),
                module: service.name().to_string(),
                version: version.to_string(),
            })
        }),
    )
}
