mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, get, setup_test_app, unique_ip};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_root() {
    let app = setup_test_app();
    let response = app.router.oneshot(get("/", &unique_ip())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Hello, World!");
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();
    let response = app.router.oneshot(get("/health", &unique_ip())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
    assert!(body["upTime"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_api_welcome() {
    let app = setup_test_app();
    let response = app.router.oneshot(get("/api", &unique_ip())).await.unwrap();
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Welcome to the Acquisitions API" })
    );
}

#[tokio::test]
async fn test_unknown_route() {
    let app = setup_test_app();
    let response = app
        .router
        .oneshot(get("/api/does-not-exist", &unique_ip()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "ROUTE Not Found" }));
}

#[tokio::test]
async fn test_openapi_document() {
    let app = setup_test_app();
    let response = app
        .router
        .oneshot(get("/api-docs/openapi.json", &unique_ip()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["paths"].get("/api/auth/sign-up").is_some());
    assert!(body["paths"].get("/api/users/{id}").is_some());
    assert!(body["components"]["securitySchemes"].get("bearer_auth").is_some());
}
