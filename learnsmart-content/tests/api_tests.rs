//! Integration tests for learnsmart-content API endpoints

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use learnsmart_common::api::types::SkillInfo;
use learnsmart_common::db::connect_in_memory;
use learnsmart_content::{build_router, db, AppState};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method
use uuid::Uuid;

async fn setup_app() -> Router {
    let pool = connect_in_memory().await.unwrap();
    db::init_tables(&pool).await.unwrap();
    build_router(AppState::new(pool))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
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

async fn create_domain(app: &Router, code: &str) -> String {
    let (status, domain) = send(
        app,
        "POST",
        "/domains",
        Some(json!({"code": code, "name": format!("{} domain", code)})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    domain["id"].as_str().unwrap().to_string()
}

async fn create_skill(app: &Router, domain_id: &str, code: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/skills",
        Some(json!({
            "domainId": domain_id,
            "code": code,
            "name": format!("Skill {}", code),
            "level": "beginner",
            "tags": ["core"]
        })),
    )
    .await
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["module"], "content-service");
}

#[tokio::test]
async fn test_domain_create_get_and_filter() {
    let app = setup_app().await;
    let math = create_domain(&app, "math").await;
    create_domain(&app, "physics").await;

    let (status, domain) = send(&app, "GET", &format!("/domains/{}", math), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(domain["code"], "math");

    let (_, all) = send(&app, "GET", "/domains", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, filtered) = send(&app, "GET", "/domains?code=physics", None).await;
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["code"], "physics");
}

#[tokio::test]
async fn test_duplicate_domain_code_conflicts() {
    let app = setup_app().await;
    create_domain(&app, "math").await;

    let (status, body) = send(&app, "POST", "/domains", Some(json!({"code": "math", "name": "Again"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_skill_embeds_domain_and_matches_contract() {
    let app = setup_app().await;
    let math = create_domain(&app, "math").await;
    let (status, skill) = create_skill(&app, &math, "fractions").await;
    assert_eq!(status, StatusCode::CREATED);

    let id = skill["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/skills/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["tags"], json!(["core"]));
    assert_eq!(fetched["domain"]["code"], "math");

    // assessment-service reads this payload through the shared contract type
    let info: SkillInfo = serde_json::from_value(fetched).unwrap();
    assert_eq!(info.name, "Skill fractions");
    assert_eq!(info.domain.unwrap().name, "math domain");
}

#[tokio::test]
async fn test_skill_code_unique_per_domain() {
    let app = setup_app().await;
    let math = create_domain(&app, "math").await;
    let physics = create_domain(&app, "physics").await;

    assert_eq!(create_skill(&app, &math, "units").await.0, StatusCode::CREATED);
    assert_eq!(create_skill(&app, &physics, "units").await.0, StatusCode::CREATED);
    assert_eq!(create_skill(&app, &math, "units").await.0, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_skill_requires_existing_domain() {
    let app = setup_app().await;
    let (status, _) = create_skill(&app, &Uuid::new_v4().to_string(), "orphan").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_skills_filters_and_pages() {
    let app = setup_app().await;
    let math = create_domain(&app, "math").await;
    let physics = create_domain(&app, "physics").await;
    for code in ["algebra-1", "algebra-2", "geometry"] {
        create_skill(&app, &math, code).await;
    }
    create_skill(&app, &physics, "optics").await;

    let (_, by_domain) = send(&app, "GET", &format!("/skills?domainId={}", math), None).await;
    assert_eq!(by_domain.as_array().unwrap().len(), 3);

    let (_, by_code) = send(&app, "GET", "/skills?code=algebra", None).await;
    assert_eq!(by_code.as_array().unwrap().len(), 2);

    let (_, second_page) = send(&app, "GET", "/skills?page=1&size=3", None).await;
    let second_page = second_page.as_array().unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0]["code"], "optics");
}

#[tokio::test]
async fn test_unknown_skill_is_404() {
    let app = setup_app().await;
    let (status, _) = send(&app, "GET", &format!("/skills/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn create_content_item(app: &Router, domain_id: &str, item_type: &str, title: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/content-items",
        Some(json!({
            "domainId": domain_id,
            "type": item_type,
            "title": title,
            "estimatedMinutes": 15,
            "difficulty": 0.4
        })),
    )
    .await
}

#[tokio::test]
async fn test_content_item_create_get_update_delete() {
    let app = setup_app().await;
    let math = create_domain(&app, "math").await;

    let (status, item) = create_content_item(&app, &math, "video", "Intro to fractions").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["domain"]["code"], "math");
    assert_eq!(item["type"], "video");
    assert_eq!(item["active"], true);
    assert_eq!(item["skills"], json!([]));
    let id = item["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, "GET", &format!("/content-items/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Intro to fractions");
    assert_eq!(fetched["estimatedMinutes"], 15);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/content-items/{}", id),
        Some(json!({"title": "Fractions, part 1", "active": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Fractions, part 1");
    assert_eq!(updated["active"], false);
    assert_eq!(updated["difficulty"], 0.4);

    let (status, _) = send(&app, "DELETE", &format!("/content-items/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/content-items/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &format!("/content-items/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_content_item_requires_existing_domain() {
    let app = setup_app().await;
    let (status, body) = create_content_item(&app, &Uuid::new_v4().to_string(), "video", "Orphan").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_content_item_validation() {
    let app = setup_app().await;
    let math = create_domain(&app, "math").await;

    let (status, _) = create_content_item(&app, &math, "video", "  ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/content-items",
        Some(json!({"domainId": math, "type": "quiz", "title": "Hard", "difficulty": 1.5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/content-items/{}", Uuid::new_v4()),
        Some(json!({"title": "Missing"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_content_items_filters() {
    let app = setup_app().await;
    let math = create_domain(&app, "math").await;
    let physics = create_domain(&app, "physics").await;
    create_content_item(&app, &math, "video", "Fractions").await;
    create_content_item(&app, &math, "article", "Decimals").await;
    let (_, optics) = create_content_item(&app, &physics, "video", "Lenses").await;
    send(
        &app,
        "PUT",
        &format!("/content-items/{}", optics["id"].as_str().unwrap()),
        Some(json!({"active": false})),
    )
    .await;

    let (status, all) = send(&app, "GET", "/content-items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, by_domain) = send(&app, "GET", &format!("/content-items?domainId={}", math), None).await;
    assert_eq!(by_domain.as_array().unwrap().len(), 2);

    let (_, videos) = send(&app, "GET", "/content-items?type=video", None).await;
    assert_eq!(videos.as_array().unwrap().len(), 2);

    let (_, active_videos) = send(&app, "GET", "/content-items?type=video&active=true", None).await;
    let active_videos = active_videos.as_array().unwrap();
    assert_eq!(active_videos.len(), 1);
    assert_eq!(active_videos[0]["title"], "Fractions");

    let (_, paged) = send(&app, "GET", "/content-items?page=1&size=2", None).await;
    assert_eq!(paged.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_content_item_skill_associations() {
    let app = setup_app().await;
    let math = create_domain(&app, "math").await;
    let (_, algebra) = create_skill(&app, &math, "algebra").await;
    let (_, geometry) = create_skill(&app, &math, "geometry").await;
    let algebra_id = algebra["id"].as_str().unwrap().to_string();
    let geometry_id = geometry["id"].as_str().unwrap().to_string();
    let (_, item) = create_content_item(&app, &math, "video", "Shapes and symbols").await;
    let uri = format!("/content-items/{}/skills", item["id"].as_str().unwrap());

    let (status, linked) = send(
        &app,
        "POST",
        &uri,
        Some(json!([
            {"skillId": algebra_id, "weight": 0.3},
            {"skillId": geometry_id, "weight": 0.7}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let skills = linked["skills"].as_array().unwrap();
    assert_eq!(skills.len(), 2);
    assert_eq!(skills[0]["skillCode"], "algebra");
    assert_eq!(skills[1]["weight"], 0.7);

    // A second call replaces the previous set
    let (status, relinked) = send(&app, "POST", &uri, Some(json!([{"skillId": geometry_id, "weight": 1.0}]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(relinked["skills"].as_array().unwrap().len(), 1);
    assert_eq!(relinked["skills"][0]["skillId"], geometry_id.as_str());

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(json!([{"skillId": Uuid::new_v4(), "weight": 1.0}])),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(json!([
            {"skillId": algebra_id, "weight": 0.5},
            {"skillId": algebra_id, "weight": 0.5}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, _) = send(&app, "POST", &uri, Some(json!([{"skillId": algebra_id, "weight": -1.0}]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Rejected calls leave the stored set untouched
    let (_, current) = send(&app, "GET", &format!("/content-items/{}", item["id"].as_str().unwrap()), None).await;
    assert_eq!(current["skills"].as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/content-items/{}/skills", Uuid::new_v4()),
        Some(json!([])),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
