use acquisitions_core::{AppError, hash_password};
use acquisitions_db::UserStore;
use acquisitions_models::{UpdateUserDto, User, UserChanges};
use anyhow::anyhow;

use crate::middleware::auth::AuthUser;

pub struct UserService;

impl UserService {
    pub async fn get_users(users: &dyn UserStore) -> Result<Vec<User>, AppError> {
        users.list().await
    }

    pub async fn get_user(users: &dyn UserStore, id: i64) -> Result<User, AppError> {
        users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    /// Applies a partial update. Non-admins may only edit themselves and may
    /// never change a role.
    pub async fn update_user(
        users: &dyn UserStore,
        actor: &AuthUser,
        id: i64,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        if actor.id() != id && !actor.is_admin() {
            return Err(AppError::forbidden(
                "You can only update your own profile".to_string(),
            ));
        }
        if dto.changes_role() && !actor.is_admin() {
            return Err(AppError::forbidden(
                "Only admins can change user roles".to_string(),
            ));
        }

        let password_hash = match dto.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let changes = UserChanges {
            name: dto.name.map(|name| name.trim().to_string()),
            email: dto.email.map(|email| email.trim().to_lowercase()),
            password_hash,
            role: dto.role,
        };

        let user = users
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        tracing::info!(user_id = id, updated_by = actor.id(), "User updated");
        Ok(user)
    }

    pub async fn delete_user(users: &dyn UserStore, actor: &AuthUser, id: i64) -> Result<(), AppError> {
        if !users.delete(id).await? {
            return Err(AppError::not_found(anyhow!("User not found")));
        }
        tracing::info!(user_id = id, deleted_by = actor.id(), "User deleted");
        Ok(())
    }
}
