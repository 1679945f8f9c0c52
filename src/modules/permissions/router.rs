use axum::{
    Router,
    routing::{delete, get, post, put},
};
use carlot_core::permissions::{
    PERMISSION_CREATE, PERMISSION_DELETE, PERMISSION_READ, PERMISSION_UPDATE,
};

use crate::middleware::require_permission;
use crate::state::AppState;

use super::controller::{
    create_permission, delete_permission, get_permission, list_permissions, update_permission,
};

pub fn init_permissions_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            require_permission(state, PERMISSION_READ, get(list_permissions))
                .merge(require_permission(state, PERMISSION_CREATE, post(create_permission))),
        )
        .route(
            "/{id}",
            require_permission(state, PERMISSION_READ, get(get_permission))
                .merge(require_permission(state, PERMISSION_UPDATE, put(update_permission)))
                .merge(require_permission(state, PERMISSION_DELETE, delete(delete_permission))),
        )
}
