//! Integration tests for learnsmart-profile API endpoints

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use learnsmart_common::api::types::{ModuleSummary, PlanSummary, SkillMasteryEnriched, UserStats};
use learnsmart_common::api::{Page, PageQuery};
use learnsmart_common::client::ClientError;
use learnsmart_common::db::connect_in_memory;
use learnsmart_profile::services::{AssessmentClient, Collaborators, PlanningClient, TrackingClient};
use learnsmart_profile::{build_router, db, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot` method
use uuid::Uuid;

/// Every collaborator call fails
struct Unreachable;

fn unreachable(service: &'static str) -> ClientError {
    ClientError::Network {
        service,
        message: "connection refused".into(),
    }
}

#[async_trait]
impl PlanningClient for Unreachable {
    async fn get_plans(&self, _user_id: &str) -> Result<Page<PlanSummary>, ClientError> {
        Err(unreachable("planning-service"))
    }
    async fn get_modules(&self, _plan_id: Uuid) -> Result<Vec<ModuleSummary>, ClientError> {
        Err(unreachable("planning-service"))
    }
}

#[async_trait]
impl AssessmentClient for Unreachable {
    async fn get_skill_mastery(&self, _user_id: Uuid) -> Result<Vec<SkillMasteryEnriched>, ClientError> {
        Err(unreachable("assessment-service"))
    }
}

#[async_trait]
impl TrackingClient for Unreachable {
    async fn get_user_stats(&self, _user_id: Uuid) -> Result<UserStats, ClientError> {
        Err(unreachable("tracking-service"))
    }
}

/// Planning answers with one plan of three modules; the rest are down
struct PlanningOnly {
    plan_id: Uuid,
}

#[async_trait]
impl PlanningClient for PlanningOnly {
    async fn get_plans(&self, user_id: &str) -> Result<Page<PlanSummary>, ClientError> {
        let plan = PlanSummary {
            id: self.plan_id,
            user_id: user_id.to_string(),
            goal_id: Some("goal-1".into()),
            status: "active".into(),
        };
        Ok(Page::new(vec![plan], &PageQuery::default(), 1))
    }

    async fn get_modules(&self, _plan_id: Uuid) -> Result<Vec<ModuleSummary>, ClientError> {
        Ok(["completed", "pending", "COMPLETED", "in_progress"]
            .into_iter()
            .map(|status| ModuleSummary {
                id: Uuid::new_v4(),
                status: status.into(),
            })
            .collect())
    }
}

fn collaborators(planning: Arc<dyn PlanningClient>) -> Collaborators {
    Collaborators {
        planning,
        assessment: Arc::new(Unreachable),
        tracking: Arc::new(Unreachable),
    }
}

async fn setup_app_with(collaborators: Collaborators) -> Router {
    let pool = connect_in_memory().await.unwrap();
    db::init_tables(&pool).await.unwrap();
    build_router(AppState::new(pool, collaborators))
}

async fn setup_app() -> Router {
    setup_app_with(collaborators(Arc::new(Unreachable))).await
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, String)],
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, value.as_str());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Should parse JSON")
    };
    (status, value)
}

fn as_user(profile: &Value) -> Vec<(&'static str, String)> {
    vec![("X-User-Id", profile["userId"].as_str().unwrap().to_string())]
}

async fn register(app: &Router, email: &str, auth: Option<&str>) -> Value {
    let headers: Vec<(&str, String)> = auth
        .map(|a| vec![("X-Auth-User-Id", a.to_string())])
        .unwrap_or_default();
    let (status, profile) = send(
        app,
        "POST",
        "/profiles",
        &headers,
        Some(json!({"email": email, "displayName": "Ana", "password": "secret123", "locale": "es-ES"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", profile);
    profile
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;
    let (status, body) = send(&app, "GET", "/health", &[], None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["module"], "profile-service");
}

#[tokio::test]
async fn test_register_profile() {
    let app = setup_app().await;

    let with_subject = register(&app, "ana@example.com", Some("kc-ana")).await;
    assert_eq!(with_subject["authUserId"], "kc-ana");
    assert_eq!(with_subject["locale"], "es-ES");
    assert!(with_subject.get("password").is_none());

    let without_subject = register(&app, "bo@example.com", None).await;
    let generated = without_subject["authUserId"].as_str().unwrap();
    assert!(Uuid::parse_str(generated).is_ok());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = setup_app().await;
    register(&app, "ana@example.com", None).await;

    let (status, body) = send(
        &app,
        "POST",
        "/profiles",
        &[],
        Some(json!({"email": "ana@example.com", "displayName": "Other"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_register_requires_fields() {
    let app = setup_app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/profiles",
        &[],
        Some(json!({"email": "not-an-email", "displayName": "Ana"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/profiles",
        &[],
        Some(json!({"email": "ana@example.com", "displayName": " "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_requires_identity() {
    let app = setup_app().await;
    let (status, body) = send(&app, "GET", "/profiles/me", &[], None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = send(&app, "GET", "/profiles/me/progress", &[], None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_by_either_header() {
    let app = setup_app().await;
    let profile = register(&app, "ana@example.com", Some("kc-ana")).await;

    let (status, by_auth) = send(
        &app,
        "GET",
        "/profiles/me",
        &[("X-Auth-User-Id", "kc-ana".to_string())],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_auth["userId"], profile["userId"]);

    let (status, by_id) = send(&app, "GET", "/profiles/me", &as_user(&profile), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id["email"], "ana@example.com");

    let (status, _) = send(
        &app,
        "GET",
        "/profiles/me",
        &[("X-Auth-User-Id", "kc-nobody".to_string())],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_profile_partial() {
    let app = setup_app().await;
    let profile = register(&app, "ana@example.com", None).await;
    let headers = as_user(&profile);

    let (status, updated) = send(
        &app,
        "PUT",
        "/profiles/me",
        &headers,
        Some(json!({"birthYear": 1990, "timezone": "Europe/Madrid"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["displayName"], "Ana");
    assert_eq!(updated["birthYear"], 1990);
    assert_eq!(updated["timezone"], "Europe/Madrid");
    assert_eq!(updated["locale"], "es-ES");

    let uri = format!("/profiles/{}", profile["userId"].as_str().unwrap());
    let (status, fetched) = send(&app, "GET", &uri, &[], None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["birthYear"], 1990);

    let (status, _) = send(&app, "GET", &format!("/profiles/{}", Uuid::new_v4()), &[], None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_goal_lifecycle() {
    let app = setup_app().await;
    let profile = register(&app, "ana@example.com", None).await;
    let headers = as_user(&profile);

    let (status, goal) = send(
        &app,
        "POST",
        "/profiles/me/goals",
        &headers,
        Some(json!({"title": "Learn algebra", "domain": "math", "dueDate": "2025-06-30"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(goal["isActive"], true);
    assert_eq!(goal["dueDate"], "2025-06-30");
    let goal_uri = format!("/profiles/me/goals/{}", goal["id"].as_str().unwrap());

    let (status, updated) = send(
        &app,
        "PUT",
        &goal_uri,
        &headers,
        Some(json!({"isActive": false, "intensity": "high"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["isActive"], false);
    assert_eq!(updated["intensity"], "high");
    assert_eq!(updated["title"], "Learn algebra");

    let (_, goals) = send(&app, "GET", "/profiles/me/goals", &headers, None).await;
    assert_eq!(goals.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &goal_uri, &headers, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &goal_uri, &headers, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_goals_of_another_user_are_not_found() {
    let app = setup_app().await;
    let owner = register(&app, "ana@example.com", None).await;
    let intruder = register(&app, "bo@example.com", None).await;

    let (_, goal) = send(
        &app,
        "POST",
        "/profiles/me/goals",
        &as_user(&owner),
        Some(json!({"title": "Learn algebra"})),
    )
    .await;
    let goal_uri = format!("/profiles/me/goals/{}", goal["id"].as_str().unwrap());

    let (status, _) = send(
        &app,
        "PUT",
        &goal_uri,
        &as_user(&intruder),
        Some(json!({"title": "Mine now"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &goal_uri, &as_user(&intruder), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, goals) = send(&app, "GET", "/profiles/me/goals", &as_user(&intruder), None).await;
    assert!(goals.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_preferences_default_then_update() {
    let app = setup_app().await;
    let profile = register(&app, "ana@example.com", None).await;
    let headers = as_user(&profile);

    let (status, prefs) = send(&app, "GET", "/profiles/me/preferences", &headers, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(prefs["hoursPerWeek"], 5.0);
    assert_eq!(prefs["notificationsEnabled"], true);
    assert_eq!(prefs["preferredDays"], json!([]));

    let (status, prefs) = send(
        &app,
        "PUT",
        "/profiles/me/preferences",
        &headers,
        Some(json!({"preferredDays": ["MON", "WED"], "preferredSessionMinutes": 45})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(prefs["hoursPerWeek"], 5.0);
    assert_eq!(prefs["preferredDays"], json!(["MON", "WED"]));

    let (_, prefs) = send(
        &app,
        "PUT",
        "/profiles/me/preferences",
        &headers,
        Some(json!({"hoursPerWeek": 8.0, "notificationsEnabled": false})),
    )
    .await;
    assert_eq!(prefs["hoursPerWeek"], 8.0);
    assert_eq!(prefs["notificationsEnabled"], false);
    assert_eq!(prefs["preferredSessionMinutes"], 45);

    let (status, _) = send(
        &app,
        "PUT",
        "/profiles/me/preferences",
        &headers,
        Some(json!({"hoursPerWeek": -1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_progress_with_all_collaborators_down() {
    let app = setup_app().await;
    let profile = register(&app, "ana@example.com", Some("kc-ana")).await;
    send(
        &app,
        "POST",
        "/profiles/me/goals",
        &as_user(&profile),
        Some(json!({"title": "Learn algebra"})),
    )
    .await;

    let (status, view) = send(
        &app,
        "GET",
        "/profiles/me/progress",
        &[("X-Auth-User-Id", "kc-ana".to_string())],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["profile"]["userId"], profile["userId"]);
    assert_eq!(view["profile"]["displayName"], "Ana");
    assert_eq!(view["goals"][0]["title"], "Learn algebra");
    assert_eq!(view["goals"][0]["percentage"], 0.0);
    assert!(view.get("currentPlan").is_none());
    assert!(view.get("skillsInProgress").is_none());
    assert!(view.get("activity").is_none());
}

#[tokio::test]
async fn test_progress_includes_current_plan() {
    let plan_id = Uuid::new_v4();
    let app = setup_app_with(collaborators(Arc::new(PlanningOnly { plan_id }))).await;
    let profile = register(&app, "ana@example.com", None).await;

    let (status, view) = send(&app, "GET", "/profiles/me/progress", &as_user(&profile), None).await;
    assert_eq!(status, StatusCode::OK);

    let plan = &view["currentPlan"];
    assert_eq!(plan["planId"], plan_id.to_string());
    assert_eq!(plan["goalId"], "goal-1");
    assert_eq!(plan["status"], "active");
    assert_eq!(plan["completedModules"], 2);
    assert_eq!(plan["totalModules"], 4);
    assert_eq!(plan["overallPercentage"], 50.0);
    assert!(view.get("activity").is_none());
}

#[tokio::test]
async fn test_progress_for_unknown_profile() {
    let app = setup_app().await;
    let (status, _) = send(
        &app,
        "GET",
        "/profiles/me/progress",
        &[("X-User-Id", Uuid::new_v4().to_string())],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
