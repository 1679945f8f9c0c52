use axum::{
    Router,
    routing::{delete, get, post, put},
};
use carlot_core::permissions::{CAR_CREATE, CAR_DELETE, CAR_READ, CAR_UPDATE};

use crate::middleware::require_permission;
use crate::state::AppState;

use super::controller::{create_car, delete_car, get_car, list_cars, update_car};

pub fn init_cars_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            require_permission(state, CAR_READ, get(list_cars))
                .merge(require_permission(state, CAR_CREATE, post(create_car))),
        )
        .route(
            "/{id}",
            require_permission(state, CAR_READ, get(get_car))
                .merge(require_permission(state, CAR_UPDATE, put(update_car)))
                .merge(require_permission(state, CAR_DELETE, delete(delete_car))),
        )
}
