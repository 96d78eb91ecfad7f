//! End-to-end API integration tests
//!
//! These tests verify the HTTP search flows including:
//! - Unpaged member search with optional criteria
//! - Simple and count-elided paging
//! - Rejection of invalid page and sort parameters

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use member_search_api::api::{router, AppState};
use member_search_api::infrastructure::repositories::InMemoryMemberRepository;
use member_search_api::infrastructure::seed::seed_sample_data;
use serde_json::Value;
use tower::util::ServiceExt; // for oneshot

/// Setup test application backed by the sample members
async fn setup_app() -> (Router, Arc<InMemoryMemberRepository>) {
    let repo = Arc::new(InMemoryMemberRepository::new());
    seed_sample_data(repo.as_ref())
        .await
        .expect("Failed to seed sample data");

    let app = router(AppState::new(repo.clone()));
    (app, repo)
}

/// Issue a GET request and decode the JSON body
async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let (app, _repo) = setup_app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_search_members_with_criteria() {
    let (app, _repo) = setup_app().await;

    let (status, json) = get_json(app, "/api/v1/members?teamName=teamB&ageGoe=35").await;

    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().expect("array of rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["username"], "member4");
    assert_eq!(rows[0]["age"], 40);
    assert_eq!(rows[0]["teamName"], "teamB");
    assert!(rows[0]["memberId"].is_i64());
    assert!(rows[0]["teamId"].is_i64());
}

#[tokio::test]
async fn test_search_members_blank_criteria() {
    let (app, _repo) = setup_app().await;

    let (status, json) = get_json(app, "/api/v1/members?username=&teamName=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().expect("array of rows").len(), 4);
}

#[tokio::test]
async fn test_search_members_blank_age_is_absent() {
    let (app, _repo) = setup_app().await;

    let (status, json) = get_json(app, "/api/v1/members?ageGoe=&ageLoe=&teamName=teamA").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().expect("array of rows").len(), 2);
}

#[tokio::test]
async fn test_search_members_rejects_malformed_age_as_json() {
    let (app, repo) = setup_app().await;

    let (status, json) = get_json(app, "/api/v1/members?ageGoe=ten").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert_eq!(repo.content_query_count(), 0, "no query should run");
}

#[tokio::test]
async fn test_page_simple_counts_total() {
    let (app, repo) = setup_app().await;

    let (status, json) = get_json(app, "/api/v2/members?page=0&size=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["content"].as_array().unwrap().len(), 3);
    assert_eq!(json["total"], 4);
    assert_eq!(json["totalPages"], 2);
    assert_eq!(json["last"], false);
    assert_eq!(repo.count_query_count(), 1);
}

#[tokio::test]
async fn test_page_complex_elides_count_on_partial_page() {
    let (app, repo) = setup_app().await;

    let (status, json) = get_json(app, "/api/v3/members?page=1&size=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["content"].as_array().unwrap().len(), 1);
    assert_eq!(json["total"], 4);
    assert_eq!(json["page"], 1);
    assert_eq!(json["offset"], 3);
    assert_eq!(json["last"], true);
    assert_eq!(repo.count_query_count(), 0);
}

#[tokio::test]
async fn test_page_complex_sorted() {
    let (app, _repo) = setup_app().await;

    let (status, json) = get_json(app, "/api/v3/members?size=2&sort=age,desc").await;

    assert_eq!(status, StatusCode::OK);
    let content = json["content"].as_array().unwrap();
    assert_eq!(content[0]["age"], 40);
    assert_eq!(content[1]["age"], 30);
    assert_eq!(json["total"], 4);
}

#[tokio::test]
async fn test_page_rejects_zero_size() {
    let (app, repo) = setup_app().await;

    let (status, json) = get_json(app, "/api/v3/members?size=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Page size"));
    assert_eq!(repo.content_query_count(), 0, "no query should run");
}

#[tokio::test]
async fn test_page_rejects_malformed_page_as_json() {
    let (app, repo) = setup_app().await;

    let (status, json) = get_json(app, "/api/v3/members?page=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("query string"));
    assert_eq!(repo.content_query_count(), 0, "no query should run");
}

#[tokio::test]
async fn test_page_blank_params_use_defaults() {
    let (app, _repo) = setup_app().await;

    let (status, json) = get_json(app, "/api/v2/members?page=&size=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["size"], 20);
    assert_eq!(json["page"], 0);
    assert_eq!(json["first"], true);
}

#[tokio::test]
async fn test_page_rejects_unknown_sort_column() {
    let (app, _repo) = setup_app().await;

    let (status, json) = get_json(app, "/api/v2/members?sort=height,asc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("height"));
}
