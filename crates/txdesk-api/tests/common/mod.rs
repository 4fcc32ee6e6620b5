#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use txdesk_api::{create_router, AppState};
use txdesk_config::Config;
use txdesk_core::Desk;
use txdesk_graphql::InMemoryApi;
use txdesk_utils::NumeralMode;

/// Build the router over the demo data set, returning the fake API so
/// tests can inspect the requests it received.
pub fn build_test_app() -> (Arc<InMemoryApi>, Router) {
    build_test_app_with(Config::default())
}

pub fn build_test_app_with(config: Config) -> (Arc<InMemoryApi>, Router) {
    let api = Arc::new(InMemoryApi::with_demo_data());
    let desk = Arc::new(Desk::new(api.clone(), NumeralMode::Decimal));
    let state = AppState { desk, config };
    (api, create_router(state))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: &str) -> Response<Body> {
    let mut request = Request::builder().method(method).uri(uri).header("hx-request", "true");
    if !body.is_empty() {
        request = request.header("content-type", "application/x-www-form-urlencoded");
    }
    app.clone()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, "").await
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response<Body> {
    send(app, Method::POST, uri, body).await
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
