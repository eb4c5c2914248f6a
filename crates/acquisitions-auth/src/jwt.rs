//! JWT (JSON Web Token) utilities for session tokens.
//!
//! Tokens are HS256-signed and carry `{id, email, role}` plus the standard
//! `exp`/`iat` timestamps. Lifetime comes from [`JwtConfig::expires_in`].

use acquisitions_config::JwtConfig;
use acquisitions_core::AppError;
use acquisitions_models::Role;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::claims::Claims;

/// Signs a session token for the given user.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_access_token(
    user_id: i64,
    email: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.expires_in.max(0) as usize;

    let claims = Claims {
        id: user_id,
        email: email.to_string(),
        role,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!(error = %e, "Error signing JWT token");
        AppError::internal_error(format!("Failed to create token: {}", e))
    })
}

/// Verifies a session token and returns its claims.
///
/// # Errors
///
/// Returns an unauthorized error if the signature is invalid, the token has
/// expired, or it is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Error verifying JWT token");
        AppError::unauthorized("Invalid or expired token".to_string())
    })
}
