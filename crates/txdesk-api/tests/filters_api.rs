//! Integration tests for the company and numeral format filters.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_string, build_test_app, get, post_form};

#[tokio::test]
async fn default_filters() {
    let (_api, app) = build_test_app();
    let json = body_json(get(&app, "/api/filters").await).await;

    assert_eq!(json["company_id"], "");
    assert_eq!(json["numeral_mode"], "decimal");
}

#[tokio::test]
async fn company_filter_uses_nested_transactions() {
    let (_api, app) = build_test_app();
    let response = post_form(&app, "/api/filters", "company=c1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("data-testid='transaction-t1'"));
    assert!(html.contains("data-testid='transaction-t2'"));
    assert!(!html.contains("data-testid='transaction-t3'"));
}

#[tokio::test]
async fn unknown_or_empty_company_shows_everything() {
    let (_api, app) = build_test_app();

    let html = body_string(post_form(&app, "/api/filters", "company=c404").await).await;
    assert!(html.contains("data-testid='transaction-t3'"));

    let html = body_string(post_form(&app, "/api/filters", "company=").await).await;
    assert!(html.contains("data-testid='transaction-t1'"));
    assert!(html.contains("data-testid='transaction-t3'"));
}

#[tokio::test]
async fn roman_format_from_query() {
    let (_api, app) = build_test_app();
    let html = body_string(post_form(&app, "/api/filters?format=roman", "").await).await;

    assert!(html.contains("data-testid='transaction-t1-amount'>MCMXCIV<"));
    assert!(html.contains("data-testid='transaction-t2-amount'>CMXLIV<"));
    // Too large for Roman numerals
    assert!(html.contains("data-testid='transaction-t3-amount'>4500<"));

    let json = body_json(get(&app, "/api/filters").await).await;
    assert_eq!(json["numeral_mode"], "roman");
}

#[tokio::test]
async fn unknown_format_is_bad_request() {
    let (_api, app) = build_test_app();
    let response = post_form(&app, "/api/filters", "format=hex").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
