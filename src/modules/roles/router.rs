use axum::{
    Router,
    routing::{delete, get, post, put},
};
use carlot_core::permissions::{ROLE_ASSIGN, ROLE_CREATE, ROLE_DELETE, ROLE_READ, ROLE_UPDATE};

use crate::middleware::require_permission;
use crate::state::AppState;

use super::controller::{
    assign_role, create_role, delete_role, get_role, grant_permission, list_roles,
    revoke_permission, update_role,
};

pub fn init_roles_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            require_permission(state, ROLE_READ, get(list_roles))
                .merge(require_permission(state, ROLE_CREATE, post(create_role))),
        )
        .route(
            "/{id}",
            require_permission(state, ROLE_READ, get(get_role))
                .merge(require_permission(state, ROLE_UPDATE, put(update_role)))
                .merge(require_permission(state, ROLE_DELETE, delete(delete_role))),
        )
        .route(
            "/assign",
            require_permission(state, ROLE_ASSIGN, post(assign_role)),
        )
        // Role permission management
        .route(
            "/{id}/permissions",
            require_permission(state, ROLE_ASSIGN, post(grant_permission)),
        )
        .route(
            "/{id}/permissions/{permission_id}",
            require_permission(state, ROLE_ASSIGN, delete(revoke_permission)),
        )
}
