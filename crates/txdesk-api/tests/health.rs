//! Integration tests for the health check, the home page and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_string, build_test_app, build_test_app_with, get};
use tower::ServiceExt;
use txdesk_config::Config;

#[tokio::test]
async fn health_check_returns_ok() {
    let (_api, app) = build_test_app();
    let response = get(&app, "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let (_api, app) = build_test_app();
    let response = get(&app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn home_page_is_full_document_without_htmx() {
    let (_api, app) = build_test_app();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Loading..."));
    assert!(html.contains("hx-trigger='load, transactions-changed from:body'"));
    assert!(html.contains("Add Transaction"));
    assert!(html.contains("<option value='c1' >Acme</option>"));
}

#[tokio::test]
async fn home_page_is_partial_for_htmx() {
    let (_api, app) = build_test_app();
    let html = body_string(get(&app, "/").await).await;

    assert!(!html.contains("<html"));
    assert!(html.contains("id='transactions-table'"));
    assert!(html.contains("id='modal-container'"));
}

#[tokio::test]
async fn cors_preflight_for_configured_origin() {
    let mut config = Config::default();
    config.server.cors_origins = vec!["http://localhost:5173".to_string()];
    let (_api, app) = build_test_app_with(config);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/filters")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");
}
