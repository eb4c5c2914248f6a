use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use acquisitions_models::{
    AuthResponse, MessageResponse, Role, SignInDto, SignUpDto, UpdateUserDto, User, UserSummary,
};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::controller::HealthResponse;
use crate::modules::users::controller::{DeleteUserResponse, UserResponse, UsersResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::sign_up,
        crate::modules::auth::controller::sign_in,
        crate::modules::auth::controller::sign_out,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::health::controller::health,
    ),
    components(
        schemas(
            User,
            Role,
            UserSummary,
            SignUpDto,
            SignInDto,
            UpdateUserDto,
            AuthResponse,
            MessageResponse,
            UsersResponse,
            UserResponse,
            DeleteUserResponse,
            HealthResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Sign-up, sign-in and sign-out"),
        (name = "Users", description = "User management endpoints"),
        (name = "Health", description = "Service liveness")
    ),
    info(
        title = "Acquisitions API",
        version = "0.1.0",
        description = "Account and user management API behind a role-aware security gate. \
                       Every request is rate limited per role (guest 5, user 10, admin 20 per minute) \
                       and screened for automated clients and attack patterns.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
