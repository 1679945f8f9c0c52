use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use carlot_core::AppError;
use carlot_models::ids::UserId;
use carlot_models::users::{CreateUserDto, UpdateUserDto, User};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service;

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = service::list_users(&state).await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>, AppError> {
    let user = service::get_user(&state, id).await?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = service::create_user(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    let user = service::update_user(&state, id, dto).await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<StatusCode, AppError> {
    service::delete_user(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
