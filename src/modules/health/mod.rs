use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "up" }))
}

pub fn init_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
