//! Application error type with HTTP response conversion.
//!
//! Every handler, extractor and middleware in the API returns [`AppError`] on
//! failure. The JSON body depends on the status:
//!
//! | status | body |
//! |--------|------|
//! | 401, 403, 500 | `{"error": "<canonical reason>", "message": "<text>"}` |
//! | validation (400) | `{"error": "Validation Failed", "details": "<text>"}` |
//! | anything else | `{"error": "<text>"}` |

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub details: Option<String>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            details: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow!(message))
    }

    /// Request input failed validation; `details` describes the offending fields.
    pub fn validation(details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow!("Validation Failed"),
            details: Some(details.into()),
        }
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = format!("{:#}", self.error);

        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = %message, "Request failed");
        }

        let with_reason = self.status == StatusCode::UNAUTHORIZED
            || self.status == StatusCode::FORBIDDEN
            || self.status == StatusCode::INTERNAL_SERVER_ERROR;

        let body = match self.details {
            _ if with_reason => json!({
                "error": self.status.canonical_reason().unwrap_or("Error"),
                "message": message,
            }),
            Some(details) => json!({
                "error": message,
                "details": details,
            }),
            None => json!({ "error": message }),
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
