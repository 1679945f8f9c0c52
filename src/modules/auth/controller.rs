use axum::{Json, extract::State};
use carlot_core::AppError;
use carlot_models::auth::{LoginRequest, LoginResponse};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service;

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = service::login(&state, dto).await?;
    Ok(Json(response))
}
