//! User entity and update DTOs.
//!
//! - [`User`] is what the API returns; it never carries the password hash
//! - [`UserRecord`] is the stored form used for credential checks
//! - [`NewUser`] / [`UserChanges`] are the store-level inputs
//! - [`UpdateUserDto`] is the validated `PUT /api/users/{id}` body

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::roles::Role;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user together with its password hash.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Partial update applied by a store; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
#[validate(schema(function = "validate_has_changes"))]
pub struct UpdateUserDto {
    #[validate(length(min = 2, max = 255, message = "name must be 2-255 characters"))]
    pub name: Option<String>,
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 128, message = "password must be 6-128 characters"))]
    pub password: Option<String>,
    #[validate(custom(function = "validate_account_role"))]
    pub role: Option<Role>,
}

impl UpdateUserDto {
    pub fn changes_role(&self) -> bool {
        self.role.is_some()
    }
}

fn validate_has_changes(dto: &UpdateUserDto) -> Result<(), ValidationError> {
    if dto.name.is_none() && dto.email.is_none() && dto.password.is_none() && dto.role.is_none()
    {
        let mut err = ValidationError::new("empty_update");
        err.message = Some("at least one field must be provided".into());
        return Err(err);
    }
    Ok(())
}

/// Stored accounts may only be `user` or `admin`.
pub fn validate_account_role(role: &Role) -> Result<(), ValidationError> {
    if role.is_assignable() {
        return Ok(());
    }
    let mut err = ValidationError::new("role");
    err.message = Some("role must be one of: user, admin".into());
    Err(err)
}
