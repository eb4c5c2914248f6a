use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use acquisitions_core::AppError;

fn format_errors(errors: &ValidationErrors) -> String {
    errors
        .errors()
        .iter()
        .flat_map(|(field, kind)| {
            let messages: Vec<String> = match kind {
                ValidationErrorsKind::Field(errors) => errors
                    .iter()
                    .map(|error| {
                        error
                            .message
                            .as_ref()
                            .map(|msg| msg.to_string())
                            .unwrap_or_else(|| format!("{} is invalid", field))
                    })
                    .collect(),
                ValidationErrorsKind::Struct(nested) => vec![format_errors(nested)],
                ValidationErrorsKind::List(_) => vec![format!("{} is invalid", field)],
            };
            messages
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn rejection_details(rejection: &JsonRejection) -> String {
    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return format!("{} is required", field);
    }

    if error_msg.contains("invalid type") {
        return "Invalid field type in request".to_string();
    }

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return "Missing 'Content-Type: application/json' header".to_string();
    }

    "Invalid request body".to_string()
}

/// JSON body that has been deserialized and validated. Any failure is a
/// 400 `Validation Failed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection_details(&rejection)))?;

        value
            .validate()
            .map_err(|errors| AppError::validation(format_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// `{id}` path segment parsed as a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::validation("id is required"))?;

        parse_user_id(&raw).map(UserId)
    }
}

fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::validation("id must be a positive integer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("42").unwrap(), 42);
        assert!(parse_user_id("0").is_err());
        assert!(parse_user_id("-3").is_err());
        assert!(parse_user_id("abc").is_err());
        assert!(parse_user_id("1.5").is_err());
    }

    #[derive(Debug, Validate)]
    struct Sample {
        #[validate(length(min = 2, message = "name must be at least 2 characters"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_format_errors_uses_messages() {
        let sample = Sample {
            name: "a".to_string(),
            email: "nope".to_string(),
        };
        let details = format_errors(&sample.validate().unwrap_err());
        assert!(details.contains("name must be at least 2 characters"));
        assert!(details.contains("email is invalid"));
    }
}
