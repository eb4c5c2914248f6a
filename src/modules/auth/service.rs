use acquisitions_core::{AppError, hash_password, verify_password};
use acquisitions_db::UserStore;
use acquisitions_models::{NewUser, SignInDto, SignUpDto, User};

use crate::metrics::{track_user_created, track_user_login_failure, track_user_login_success};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Creates an account. Fails with 409 when the email is already registered.
    pub async fn sign_up(users: &dyn UserStore, dto: SignUpDto) -> Result<User, AppError> {
        let role = dto.role();
        let password_hash = hash_password(&dto.password)?;

        let user = users
            .create(NewUser {
                name: dto.name.trim().to_string(),
                email: dto.email.trim().to_lowercase(),
                password_hash,
                role,
            })
            .await?;

        track_user_created(user.role.as_str());
        tracing::info!(user_id = user.id, email = %user.email, role = %user.role, "User registered");
        Ok(user)
    }

    /// Checks credentials. Unknown email and wrong password are
    /// indistinguishable to the caller.
    pub async fn authenticate(users: &dyn UserStore, dto: SignInDto) -> Result<User, AppError> {
        let email = dto.email.trim().to_lowercase();

        let Some(record) = users.find_by_email(&email).await? else {
            track_user_login_failure("unknown_email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(&dto.password, &record.password_hash)? {
            track_user_login_failure("invalid_password");
            tracing::warn!(email = %email, "Sign-in with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        track_user_login_success(record.user.role.as_str());
        tracing::info!(user_id = record.user.id, "User signed in");
        Ok(record.user)
    }
}
