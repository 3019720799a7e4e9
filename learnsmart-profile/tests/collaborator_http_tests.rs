//! Progress view against real HTTP collaborators
//!
//! A small axum server bound to 127.0.0.1:0 plays planning, assessment and
//! tracking, answering with the same JSON shapes those services produce.

use axum::{
    body::Body,
    extract::{Path, Query},
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use learnsmart_common::db::connect_in_memory;
use learnsmart_profile::services::{
    Collaborators, HttpAssessmentClient, HttpPlanningClient, HttpTrackingClient,
};
use learnsmart_profile::{build_router, db, AppState};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt; // for `oneshot` method

const PLAN_ID: &str = "0b8c5d1e-7f0a-4c3b-9d2e-1f4a5b6c7d8e";

async fn plans(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let user_id = params.get("userId").cloned().unwrap_or_default();
    Json(json!({
        "content": [{
            "id": PLAN_ID,
            "userId": user_id,
            "goalId": null,
            "status": "active",
            "hoursPerWeek": 5.0,
            "modules": []
        }],
        "page": 0,
        "size": 20,
        "totalElements": 1,
        "totalPages": 1
    }))
}

async fn modules(Path(_plan_id): Path<String>) -> Json<Value> {
    Json(json!([
        {"id": "11111111-1111-4111-8111-111111111111", "position": 1, "status": "completed"},
        {"id": "22222222-2222-4222-8222-222222222222", "position": 2, "status": "pending"},
        {"id": "33333333-3333-4333-8333-333333333333", "position": 3, "status": "pending"},
        {"id": "44444444-4444-4444-8444-444444444444", "position": 4, "status": "pending"}
    ]))
}

async fn skill_mastery(Path(_user_id): Path<String>) -> Json<Value> {
    Json(json!([
        {"skillId": "55555555-5555-4555-8555-555555555555", "skillName": "Fractions",
         "domainName": "Math", "mastery": 0.7, "attempts": 4,
         "lastUpdate": "2024-03-01T12:00:00.000000Z"},
        {"skillId": "66666666-6666-4666-8666-666666666666", "skillName": "Skill 66666666-6666-4666-8666-666666666666",
         "domainName": null, "mastery": 0.25, "attempts": 1, "lastUpdate": null}
    ]))
}

/// Start the stand-in collaborator; returns its base URL
async fn spawn_collaborators(with_tracking: bool) -> String {
    let mut app = Router::new()
        .route("/plans", get(plans))
        .route("/plans/:plan_id/modules", get(modules))
        .route("/users/:user_id/skill-mastery", get(skill_mastery));
    if with_tracking {
        app = app.route(
            "/analytics/users/:user_id/stats",
            get(|| async {
                Json(json!({"totalHours": 3.5, "currentStreak": 2, "lessonsCompleted": 4,
                            "assessmentsTaken": 1, "totalEvents": 12}))
            }),
        );
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn setup_app(base_url: &str) -> Router {
    let timeout = Duration::from_secs(5);
    let collaborators = Collaborators {
        planning: Arc::new(HttpPlanningClient::new(base_url, timeout).unwrap()),
        assessment: Arc::new(HttpAssessmentClient::new(base_url, timeout).unwrap()),
        tracking: Arc::new(HttpTrackingClient::new(base_url, timeout).unwrap()),
    };
    let pool = connect_in_memory().await.unwrap();
    db::init_tables(&pool).await.unwrap();
    build_router(AppState::new(pool, collaborators))
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    (status, serde_json::from_slice(&bytes).expect("Should parse JSON"))
}

async fn progress_for_new_profile(app: &Router) -> Value {
    let register = Request::builder()
        .method("POST")
        .uri("/profiles")
        .header("content-type", "application/json")
        .header("X-Auth-User-Id", "kc-ana")
        .body(Body::from(
            json!({"email": "ana@example.com", "displayName": "Ana"}).to_string(),
        ))
        .unwrap();
    let (status, _) = call(app, register).await;
    assert_eq!(status, StatusCode::CREATED);

    let progress = Request::builder()
        .uri("/profiles/me/progress")
        .header("X-Auth-User-Id", "kc-ana")
        .body(Body::empty())
        .unwrap();
    let (status, view) = call(app, progress).await;
    assert_eq!(status, StatusCode::OK);
    view
}

#[tokio::test]
async fn test_progress_over_http() {
    let base_url = spawn_collaborators(true).await;
    let app = setup_app(&base_url).await;

    let view = progress_for_new_profile(&app).await;

    assert_eq!(view["currentPlan"]["planId"], PLAN_ID);
    assert_eq!(view["currentPlan"]["completedModules"], 1);
    assert_eq!(view["currentPlan"]["totalModules"], 4);
    assert_eq!(view["currentPlan"]["overallPercentage"], 25.0);

    let skills = view["skillsInProgress"].as_array().unwrap();
    assert_eq!(skills.len(), 2);
    assert_eq!(skills[0]["skillName"], "Fractions");
    assert_eq!(skills[0]["mastery"], 0.7);

    assert_eq!(view["activity"]["totalHours"], 3.5);
    assert_eq!(view["activity"]["currentStreak"], 2);
}

#[tokio::test]
async fn test_missing_collaborator_route_drops_only_that_section() {
    // Tracking answers 404
    let base_url = spawn_collaborators(false).await;
    let app = setup_app(&base_url).await;

    let view = progress_for_new_profile(&app).await;

    assert!(view.get("activity").is_none());
    assert_eq!(view["currentPlan"]["totalModules"], 4);
    assert_eq!(view["skillsInProgress"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unreachable_collaborators() {
    // Nothing listens on the discard port
    let app = setup_app("http://127.0.0.1:9").await;

    let view = progress_for_new_profile(&app).await;

    assert_eq!(view["profile"]["displayName"], "Ana");
    assert!(view["goals"].as_array().unwrap().is_empty());
    assert!(view.get("currentPlan").is_none());
    assert!(view.get("skillsInProgress").is_none());
    assert!(view.get("activity").is_none());
}
