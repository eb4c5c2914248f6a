use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_app, metrics_middleware};
use crate::middleware::security::security_gate;
use crate::modules::auth::router::init_auth_router;
use crate::modules::health::controller::{mark_started, route_not_found};
use crate::modules::health::router::init_health_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

/// Builds the application router. The security gate wraps every route,
/// `/metrics` and the fallback included; CORS, metrics and request logging
/// sit outside it.
///
/// Routes must all be registered before the layers below: `Router::layer`
/// only wraps what already exists.
pub fn init_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    mark_started();

    let mut routes = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_health_router())
        .nest("/api/auth", init_auth_router())
        .nest("/api/users", init_users_router(&state));

    if let Some(handle) = metrics_handle {
        routes = routes.merge(metrics_app(handle));
    }

    routes
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), security_gate))
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
