mod common;

use axum::http::StatusCode;
use common::{
    body_json, generate_name, generate_unique_email, get, json_request, set_cookie,
    setup_test_app, unique_ip, browser_request,
};
use axum::body::Body;
use axum::http::header;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_sign_up_success_sets_cookie() {
    let app = setup_test_app();
    let email = generate_unique_email();

    let request = json_request(
        "POST",
        "/api/auth/sign-up",
        &unique_ip(),
        None,
        &json!({ "name": generate_name(), "email": email, "password": "secret123" }),
    );
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Max-Age=900"));

    let body = body_json(response).await;
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["email"], email);
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"]["id"].is_i64());
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_sign_up_as_admin() {
    let app = setup_test_app();
    let request = json_request(
        "POST",
        "/api/auth/sign-up",
        &unique_ip(),
        None,
        &json!({
            "name": generate_name(),
            "email": generate_unique_email(),
            "password": "secret123",
            "role": "admin"
        }),
    );
    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["user"]["role"], "admin");
}

#[tokio::test]
async fn test_sign_up_duplicate_email() {
    let app = setup_test_app();
    let ip = unique_ip();
    let payload = json!({ "name": generate_name(), "email": generate_unique_email(), "password": "secret123" });

    let first = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/auth/sign-up", &ip, None, &payload))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .router
        .oneshot(json_request("POST", "/api/auth/sign-up", &ip, None, &payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(second).await,
        json!({ "error": "User with this email already exists" })
    );
}

#[tokio::test]
async fn test_sign_up_validation() {
    let app = setup_test_app();

    let cases = [
        json!({ "name": "A", "email": generate_unique_email(), "password": "secret123" }),
        json!({ "name": generate_name(), "email": "not-an-email", "password": "secret123" }),
        json!({ "name": generate_name(), "email": generate_unique_email(), "password": "123" }),
        json!({ "name": generate_name(), "email": generate_unique_email(), "password": "secret123", "role": "superuser" }),
        json!({ "email": generate_unique_email(), "password": "secret123" }),
    ];

    for payload in cases {
        let response = app
            .router
            .clone()
            .oneshot(json_request("POST", "/api/auth/sign-up", &unique_ip(), None, &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{payload}");
        let body = body_json(response).await;
        assert_eq!(body["error"], "Validation Failed");
        assert!(body["details"].is_string());
    }
}

#[tokio::test]
async fn test_sign_in_success_and_cookie_authenticates() {
    let app = setup_test_app();
    let ip = unique_ip();
    let email = generate_unique_email();

    let sign_up = json!({ "name": generate_name(), "email": email, "password": "secret123" });
    app.router
        .clone()
        .oneshot(json_request("POST", "/api/auth/sign-up", &ip, None, &sign_up))
        .await
        .unwrap();

    let sign_in = json!({ "email": email, "password": "secret123" });
    let response = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/auth/sign-in", &ip, None, &sign_in))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response);
    let token_pair = cookie.split(';').next().unwrap().to_string();
    let body = body_json(response).await;
    assert_eq!(body["message"], "User signed in successfully");
    let id = body["user"]["id"].as_i64().unwrap();

    let request = browser_request("GET", &format!("/api/users/{id}"), &ip)
        .header(header::COOKIE, token_pair)
        .body(Body::empty())
        .unwrap();
    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["email"], email);
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let app = setup_test_app();
    let ip = unique_ip();
    let email = generate_unique_email();

    let sign_up = json!({ "name": generate_name(), "email": email, "password": "secret123" });
    app.router
        .clone()
        .oneshot(json_request("POST", "/api/auth/sign-up", &ip, None, &sign_up))
        .await
        .unwrap();

    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/api/auth/sign-in",
            &ip,
            None,
            &json!({ "email": email, "password": "wrong-password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Unauthorized", "message": "Invalid email or password" })
    );
}

#[tokio::test]
async fn test_sign_in_unknown_email() {
    let app = setup_test_app();
    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/api/auth/sign-in",
            &unique_ip(),
            None,
            &json!({ "email": generate_unique_email(), "password": "secret123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sign_out_clears_cookie() {
    let app = setup_test_app();
    let request = browser_request("POST", "/api/auth/sign-out", &unique_ip())
        .body(Body::empty())
        .unwrap();
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert_eq!(
        body_json(response).await,
        json!({ "message": "User signed out successfully" })
    );
}

#[tokio::test]
async fn test_missing_content_type_is_validation_error() {
    let app = setup_test_app();
    let request = browser_request("POST", "/api/auth/sign-in", &unique_ip())
        .body(Body::from(r#"{"email":"a@b.co","password":"x"}"#))
        .unwrap();
    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Validation Failed");
}

#[tokio::test]
async fn test_auth_routes_are_rate_limited() {
    let app = setup_test_app();
    let ip = unique_ip();

    for _ in 0..5 {
        let response = app.router.clone().oneshot(get("/api", &ip)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/api/auth/sign-in",
            &ip,
            None,
            &json!({ "email": generate_unique_email(), "password": "secret123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
