use axum::{
    Router, middleware,
    routing::{delete, get},
};

use super::controller::{delete_user, get_user, get_users, update_user};
use crate::middleware::role::require_admin;
use crate::state::AppState;

pub fn init_users_router(state: &AppState) -> Router<AppState> {
    let admin_only = Router::new()
        .route("/", get(get_users))
        .route("/{id}", delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/{id}", get(get_user).put(update_user))
        .merge(admin_only)
}
