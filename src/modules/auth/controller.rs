use acquisitions_auth::create_access_token;
use acquisitions_core::AppError;
use acquisitions_models::{AuthResponse, MessageResponse, SignInDto, SignUpDto, User, UserSummary};
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::instrument;
use utoipa::ToSchema;

use super::service::AuthService;
use crate::cookies::{cleared_cookie, session_cookie};
use crate::metrics::track_jwt_issued;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: Option<String>,
}

fn issue_session(state: &AppState, user: &User) -> Result<String, AppError> {
    let token = create_access_token(user.id, &user.email, user.role, &state.jwt_config)?;
    track_jwt_issued();
    Ok(session_cookie(&state.cookie_config, &token))
}

/// Register a new account and start a session
#[utoipa::path(
    post,
    path = "/api/auth/sign-up",
    request_body = SignUpDto,
    responses(
        (status = 201, description = "User created, session cookie set", body = AuthResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignUpDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::sign_up(state.users.as_ref(), dto).await?;
    let cookie = issue_session(&state, &user)?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            user: UserSummary::from(&user),
        }),
    ))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    request_body = SignInDto,
    responses(
        (status = 200, description = "Signed in, session cookie set", body = AuthResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignInDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::authenticate(state.users.as_ref(), dto).await?;
    let cookie = issue_session(&state, &user)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "User signed in successfully".to_string(),
            user: UserSummary::from(&user),
        }),
    ))
}

/// End the session by clearing the token cookie
#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    responses(
        (status = 200, description = "Signed out, session cookie cleared", body = MessageResponse)
    ),
    tag = "Authentication"
)]
pub async fn sign_out(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!("User signed out");
    (
        [(header::SET_COOKIE, cleared_cookie(&state.cookie_config))],
        Json(MessageResponse {
            message: "User signed out successfully".to_string(),
        }),
    )
}
