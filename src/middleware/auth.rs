use acquisitions_auth::Claims;
use acquisitions_core::AppError;
use acquisitions_models::Role;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::middleware::identity::{IdentityError, resolve};
use crate::state::AppState;

/// Extractor that validates the session token and provides the caller's
/// claims. Rejects with 401 when the token is missing, invalid or expired.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn is_admin(&self) -> bool {
        self.0.role == Role::Admin
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.0.role)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve(&parts.headers, &state.cookie_config.name, &state.jwt_config) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(err @ IdentityError::Invalid) => {
                tracing::warn!(path = %parts.uri.path(), "Rejected invalid or expired token");
                Err(AppError::unauthorized(err.to_string()))
            }
            Err(err) => Err(AppError::unauthorized(err.to_string())),
        }
    }
}
