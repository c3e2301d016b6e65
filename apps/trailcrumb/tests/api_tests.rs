//! Integration tests for the Trailcrumb HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use trailcrumb::api::{AppState, HealthResponse, StatusResponse, TrailResponse, create_router};
use trailcrumb::site::Site;
use trailcrumb_core::{FrontDisplay, Settings, site_from_json};

const SITE: &str = r#"{
    "home_url": "https://example.com",
    "content_types": [
        { "name": "post", "label": "Posts" },
        { "name": "page", "label": "Pages" }
    ],
    "taxonomies": [{ "name": "category", "hierarchical": true }],
    "terms": [
        { "id": 1, "taxonomy": "category", "slug": "news", "name": "News" },
        { "id": 2, "taxonomy": "category", "slug": "local", "name": "Local", "parent": 1 }
    ],
    "items": [
        { "id": 7, "content_type": "page", "slug": "blog", "title": "Blog" },
        { "id": 10, "content_type": "page", "slug": "about", "title": "About" },
        { "id": 11, "content_type": "page", "slug": "secret", "title": "Secret",
          "parent": 10, "visibility": "private" },
        { "id": 12, "content_type": "page", "slug": "inner", "title": "Inner", "parent": 11 },
        { "id": 20, "content_type": "post", "slug": "hello", "title": "Hello",
          "terms": { "category": [2] } }
    ]
}"#;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn create_test_server() -> TestServer {
    let graph = site_from_json(SITE).unwrap();
    let mut settings = Settings {
        front_display: FrontDisplay::StaticPage,
        blog_page: Some(7),
        ..Settings::default()
    };
    settings
        .primary_taxonomy
        .insert("post".to_string(), "category".to_string());

    let state = AppState::new(Site::new(graph, settings));
    TestServer::new(create_router(state)).unwrap()
}

fn texts(response: &TrailResponse) -> Vec<&str> {
    response.crumbs.iter().map(|c| c.text.as_str()).collect()
}

// =============================================================================
// HEALTH AND STATUS ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_status_reports_counts() {
    let server = create_test_server();

    let response = server.get("/status").await;

    response.assert_status_ok();
    let status: StatusResponse = response.json();
    assert_eq!(status.item_count, 5);
    assert_eq!(status.term_count, 2);
    assert_eq!(status.content_type_count, 2);
}

// =============================================================================
// TRAIL ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_trail_for_post() {
    let server = create_test_server();

    let response = server
        .post("/trail")
        .json(&json!({ "kind": "singular", "current_item": 20 }))
        .await;

    response.assert_status_ok();
    let trail: TrailResponse = response.json();
    assert!(trail.success);
    assert_eq!(texts(&trail), vec!["Home", "Blog", "News", "Local", "Hello"]);
    assert_eq!(
        trail.crumbs[3].url.as_deref(),
        Some("https://example.com/category/news/local/")
    );
    assert!(trail.warnings.is_empty());
}

#[tokio::test]
async fn test_trail_suppresses_private_links() {
    let server = create_test_server();

    let response = server
        .post("/trail")
        .json(&json!({ "kind": "singular", "current_item": 12 }))
        .await;

    response.assert_status_ok();
    let trail: TrailResponse = response.json();
    assert_eq!(texts(&trail), vec!["Home", "About", "Secret", "Inner"]);
    assert!(!trail.crumbs[2].is_linked());
    assert!(trail.crumbs[3].is_linked());
}

#[tokio::test]
async fn test_trail_for_search() {
    let server = create_test_server();

    let response = server
        .post("/trail")
        .json(&json!({ "kind": "search", "query": "<b>x</b>" }))
        .await;

    response.assert_status_ok();
    let trail: TrailResponse = response.json();
    assert_eq!(
        texts(&trail),
        vec!["Home", "You searched for \"&lt;b&gt;x&lt;/b&gt;\""]
    );
    assert!(trail.crumbs[1].allow_html);
}

#[tokio::test]
async fn test_trail_for_day_archive() {
    let server = create_test_server();

    let response = server
        .post("/trail")
        .json(&json!({
            "kind": "date_archive",
            "archive": { "period": "day", "date": "2023-03-14" }
        }))
        .await;

    response.assert_status_ok();
    let trail: TrailResponse = response.json();
    assert_eq!(
        texts(&trail),
        vec!["Home", "March 2023", "Archives for March 14, 2023"]
    );
}

#[tokio::test]
async fn test_singular_without_item_is_bad_request() {
    let server = create_test_server();

    let response = server.post("/trail").json(&json!({ "kind": "singular" })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let trail: TrailResponse = response.json();
    assert!(!trail.success);
    assert!(trail.error.is_some());
}

#[tokio::test]
async fn test_unknown_item_is_not_found() {
    let server = create_test_server();

    let response = server
        .post("/trail")
        .json(&json!({ "kind": "singular", "current_item": 999 }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let server = create_test_server();

    let response = server.post("/trail").json(&json!({ "kind": "sideways" })).await;

    assert!(response.status_code().is_client_error());
}
