mod support;

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use support::{test_config, TestApp};
use tower::ServiceExt;

async fn login_from(app: &TestApp, peer: SocketAddr) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/admin/login")
        .header(header::CONTENT_TYPE, "application/json")
        .extension(ConnectInfo(peer))
        .body(Body::from(
            json!({ "username": "someone", "password": "wrong" }).to_string(),
        ))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn admin_login_is_limited_per_ip() {
    let mut config = test_config();
    config.rate_limit_enabled = true;
    config.rate_limit_ip_max_requests = 2;
    config.rate_limit_ip_window_seconds = 3600;
    let app = TestApp::with_config(config);

    let peer: SocketAddr = "203.0.113.7:40000".parse().unwrap();
    for _ in 0..2 {
        let (status, _) = login_from(&app, peer).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let (status, body) = login_from(&app, peer).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], "RATE_LIMITED");
    assert!(body["details"]["retry_after"].as_u64().is_some_and(|s| s > 0));

    let other: SocketAddr = "198.51.100.9:40000".parse().unwrap();
    let (status, _) = login_from(&app, other).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reads_are_not_limited() {
    let mut config = test_config();
    config.rate_limit_enabled = true;
    config.rate_limit_ip_max_requests = 1;
    let app = TestApp::with_config(config);

    for _ in 0..3 {
        let (status, _) = app.request(Method::GET, "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
