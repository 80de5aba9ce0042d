// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /api/updates          (wire shape the display surfaces expect)
// - GET /api/updates/summary
// - POST /api/refresh

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use classroom_updates::api::{create_router, AppState};
use classroom_updates::broadcast::UpdatesHandle;
use classroom_updates::feed::source::StaticFeedSource;

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

const SHEET: &str = "\
Status,Category,Title,Notification Message,Action,Link to Action,Date,Expires
,Urgent,Fee Due,Pay by Friday,Pay online,https://pay.example/fees,2025-01-01,
,Homework,Math p.12,Finish at home,-,-,2025-01-03,
";

/// Build the same Router the binary uses, backed by a static sheet.
fn test_router() -> (Router, UpdatesHandle) {
    let updates = UpdatesHandle::new(Some(Box::new(StaticFeedSource::new(SHEET))));
    let router = create_router(AppState {
        updates: updates.clone(),
    });
    (router, updates)
}

async fn json_body(resp: axum::response::Response) -> Json {
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let (app, _) = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    assert_eq!(std::str::from_utf8(&bytes).expect("utf8").trim(), "ok");
}

#[tokio::test]
async fn api_updates_serves_camel_case_records() {
    let (app, updates) = test_router();
    updates.refresh().await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/updates")
        .body(Body::empty())
        .expect("build GET /api/updates");

    let resp = app.oneshot(req).await.expect("oneshot /api/updates");
    assert!(resp.status().is_success());

    let v = json_body(resp).await;
    let arr = v.as_array().expect("array of updates");
    assert_eq!(arr.len(), 2);

    // Contract checks for the display surfaces.
    let first = &arr[0];
    assert_eq!(first.get("priority").and_then(Json::as_u64), Some(1));
    assert_eq!(
        first.get("type").and_then(Json::as_str),
        Some("urgent"),
        "type tag must be the lowercase wire form"
    );
    assert_eq!(first.get("title").and_then(Json::as_str), Some("Fee Due"));
    assert_eq!(
        first.get("linkText").and_then(Json::as_str),
        Some("Pay online")
    );
    assert_eq!(
        first.get("createdAt").and_then(Json::as_str),
        Some("2025-01-01")
    );
    assert!(first.get("expiresAt").is_some(), "missing 'expiresAt'");
    assert!(first.get("id").is_some(), "missing 'id'");
}

#[tokio::test]
async fn api_summary_reports_state_and_homework_count() {
    let (app, updates) = test_router();

    // Before the first cycle: loading, empty.
    let req = Request::builder()
        .method("GET")
        .uri("/api/updates/summary")
        .body(Body::empty())
        .expect("build GET summary");
    let v = json_body(app.clone().oneshot(req).await.expect("oneshot")).await;
    assert_eq!(v.get("state").and_then(Json::as_str), Some("loading"));
    assert_eq!(v.get("count").and_then(Json::as_u64), Some(0));

    updates.refresh().await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/updates/summary")
        .body(Body::empty())
        .expect("build GET summary");
    let v = json_body(app.oneshot(req).await.expect("oneshot")).await;
    assert_eq!(v.get("state").and_then(Json::as_str), Some("ready"));
    assert_eq!(v.get("count").and_then(Json::as_u64), Some(2));
    assert_eq!(v.get("homeworkCount").and_then(Json::as_u64), Some(1));
    assert!(v.get("lastRefreshUnix").and_then(Json::as_i64).is_some());
}

#[tokio::test]
async fn api_refresh_runs_a_cycle_and_returns_the_fresh_summary() {
    let (app, _) = test_router();

    let req = Request::builder()
        .method("POST")
        .uri("/api/refresh")
        .body(Body::empty())
        .expect("build POST /api/refresh");

    let resp = app.oneshot(req).await.expect("oneshot /api/refresh");
    assert!(resp.status().is_success());

    let v = json_body(resp).await;
    assert_eq!(v.get("state").and_then(Json::as_str), Some("ready"));
    assert_eq!(v.get("count").and_then(Json::as_u64), Some(2));
}
