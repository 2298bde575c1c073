//! Integration tests for health, readiness and metrics endpoints.

mod common;

use axum::http::StatusCode;
use common::{get_request, memory_app, parse_response_body, unconfigured_app};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_unconfigured_is_degraded() {
    let response = unconfigured_app()
        .oneshot(get_request("/api/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["store"]["connection"], "unconfigured");
    assert_eq!(body["store"]["reachable"], false);
}

#[tokio::test]
async fn test_health_configured_store() {
    let (app, store) = memory_app();

    let response = app.clone().oneshot(get_request("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"]["backend"], "memory");

    store.set_failing(true);
    let response = app.oneshot(get_request("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(parse_response_body(response).await["status"], "unhealthy");
}

#[tokio::test]
async fn test_ready_follows_store() {
    let response = unconfigured_app()
        .oneshot(get_request("/api/health/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (app, store) = memory_app();
    store.set_failing(true);
    let response = app.oneshot(get_request("/api/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_live() {
    let response = unconfigured_app()
        .oneshot(get_request("/api/health/live"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["status"], "alive");
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let response = unconfigured_app()
        .oneshot(get_request("/metrics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
