use axum::{
    Router,
    routing::{delete, get, post, put},
};
use carlot_core::permissions::{USER_CREATE, USER_DELETE, USER_READ, USER_UPDATE};

use crate::middleware::require_permission;
use crate::state::AppState;

use super::controller::{create_user, delete_user, get_user, list_users, update_user};

pub fn init_users_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            require_permission(state, USER_READ, get(list_users))
                .merge(require_permission(state, USER_CREATE, post(create_user))),
        )
        .route(
            "/{id}",
            require_permission(state, USER_READ, get(get_user))
                .merge(require_permission(state, USER_UPDATE, put(update_user)))
                .merge(require_permission(state, USER_DELETE, delete(delete_user))),
        )
}
