#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use acquisitions::acquisitions_auth::create_access_token;
use acquisitions::acquisitions_config::{CookieConfig, CorsConfig, JwtConfig, SecurityConfig};
use acquisitions::acquisitions_core::hash_password;
use acquisitions::acquisitions_db::{InMemoryUserStore, UserStore};
use acquisitions::acquisitions_guard::{DecisionEngine, LocalDecisionEngine};
use acquisitions::acquisitions_models::{NewUser, Role, User};
use acquisitions::router::init_router;
use acquisitions::state::AppState;
use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, Response, header};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use http_body_util::BodyExt;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde_json::Value;
use uuid::Uuid;

pub const BROWSER_UA: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15";

pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub struct TestApp {
    pub router: Router,
    pub users: InMemoryUserStore,
    pub state: AppState,
}

pub fn test_state(users: InMemoryUserStore, engine: Arc<dyn DecisionEngine>) -> AppState {
    AppState {
        users: Arc::new(users),
        engine,
        jwt_config: JwtConfig {
            secret: "test-secret".to_string(),
            expires_in: 3600,
        },
        cookie_config: CookieConfig::default(),
        cors_config: CorsConfig::default(),
        security_config: SecurityConfig::default(),
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {})
}

/// Test app whose state can be adjusted before the router is built.
pub fn setup_test_app_with(configure: impl FnOnce(&mut AppState)) -> TestApp {
    build_test_app(configure, None)
}

/// Test app that also serves `/metrics` from a recorder local to the test.
pub fn setup_test_app_with_metrics() -> TestApp {
    build_test_app(|_| {}, Some(test_metrics_handle()))
}

pub fn test_metrics_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

fn build_test_app(
    configure: impl FnOnce(&mut AppState),
    metrics_handle: Option<PrometheusHandle>,
) -> TestApp {
    let users = InMemoryUserStore::new();
    let mut state = test_state(users.clone(), Arc::new(LocalDecisionEngine::default()));
    configure(&mut state);
    TestApp {
        router: init_router(state.clone(), metrics_handle),
        users,
        state,
    }
}

/// A fresh client address per call so tests don't share rate windows.
pub fn unique_ip() -> String {
    static NEXT: AtomicU32 = AtomicU32::new(1);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    format!("10.{}.{}.{}", (n >> 16) & 0xff, (n >> 8) & 0xff, n & 0xff)
}

pub fn generate_unique_email() -> String {
    let email: String = SafeEmail().fake();
    format!("{}.{}", Uuid::new_v4().simple(), email.to_lowercase())
}

pub fn generate_name() -> String {
    Name().fake()
}

/// Socket peer the way `into_make_service_with_connect_info` records it.
pub fn peer(ip: &str) -> ConnectInfo<SocketAddr> {
    ConnectInfo(SocketAddr::new(ip.parse().unwrap(), 40_000))
}

/// Request builder with no User-Agent, connecting from `ip`.
pub fn request_from(method: &str, uri: &str, ip: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(uri).extension(peer(ip))
}

/// Request builder carrying a browser User-Agent, connecting from `ip`.
pub fn browser_request(method: &str, uri: &str, ip: &str) -> axum::http::request::Builder {
    request_from(method, uri, ip).header(header::USER_AGENT, BROWSER_UA)
}

pub fn get(uri: &str, ip: &str) -> Request<Body> {
    browser_request("GET", uri, ip).body(Body::empty()).unwrap()
}

pub fn get_with_token(uri: &str, ip: &str, token: &str) -> Request<Body> {
    browser_request("GET", uri, ip)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, ip: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = browser_request(method, uri, ip).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn create_test_user(users: &InMemoryUserStore, role: Role) -> User {
    users
        .create(NewUser {
            name: generate_name(),
            email: generate_unique_email(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role,
        })
        .await
        .unwrap()
}

pub fn token_for(state: &AppState, user: &User) -> String {
    create_access_token(user.id, &user.email, user.role, &state.jwt_config).unwrap()
}

pub fn set_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
