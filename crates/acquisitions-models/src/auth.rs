//! Sign-up / sign-in DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::roles::Role;
use crate::users::{User, validate_account_role};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignUpDto {
    #[validate(length(min = 2, max = 255, message = "name must be 2-255 characters"))]
    pub name: String,
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6-128 characters"))]
    pub password: String,
    /// Defaults to `user` when omitted.
    #[validate(custom(function = "validate_account_role"))]
    pub role: Option<Role>,
}

impl SignUpDto {
    pub fn role(&self) -> Role {
        self.role.unwrap_or(Role::User)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignInDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// The slice of a user echoed back by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
