use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::my_permissions;

pub fn init_me_router() -> Router<AppState> {
    Router::new().route("/permissions", get(my_permissions))
}
