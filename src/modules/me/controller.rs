use axum::{Json, extract::State};
use carlot_core::AppError;
use carlot_models::roles::UserPermissionsResponse;

use crate::middleware::Identity;
use crate::state::AppState;

use super::service;

pub async fn my_permissions(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<UserPermissionsResponse>, AppError> {
    let response = service::my_permissions(&state, identity).await?;
    Ok(Json(response))
}
