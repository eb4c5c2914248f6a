//! Role-based authorization middleware.
//!
//! ```rust,ignore
//! use axum::{Router, middleware};
//! use crate::middleware::role::require_admin;
//!
//! let admin_routes = Router::new()
//!     .route("/", get(list_handler))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

use acquisitions_core::AppError;
use acquisitions_models::Role;
use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Lets the request through only when the caller holds one of
/// `allowed_roles`. 401 without a valid token, 403 with the wrong role.
pub async fn require_roles(
    state: &AppState,
    req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let auth_user = AuthUser::from_request_parts(&mut parts, state).await?;

    if !auth_user.has_any_role(allowed_roles) {
        tracing::warn!(
            user_id = auth_user.id(),
            role = %auth_user.role(),
            path = %parts.uri.path(),
            "Insufficient permissions"
        );
        return Err(AppError::forbidden("Insufficient permissions".to_string()));
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(&state, req, next, &[Role::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
