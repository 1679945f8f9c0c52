use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use carlot_core::AppError;
use carlot_models::ids::PermissionId;
use carlot_models::roles::{CreatePermissionDto, Permission, UpdatePermissionDto};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service;

pub async fn list_permissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Permission>>, AppError> {
    let permissions = service::list_permissions(&state).await?;
    Ok(Json(permissions))
}

pub async fn create_permission(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreatePermissionDto>,
) -> Result<(StatusCode, Json<Permission>), AppError> {
    let permission = service::create_permission(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(permission)))
}

pub async fn get_permission(
    State(state): State<AppState>,
    Path(id): Path<PermissionId>,
) -> Result<Json<Permission>, AppError> {
    let permission = service::get_permission(&state, id).await?;
    Ok(Json(permission))
}

pub async fn update_permission(
    State(state): State<AppState>,
    Path(id): Path<PermissionId>,
    ValidatedJson(dto): ValidatedJson<UpdatePermissionDto>,
) -> Result<Json<Permission>, AppError> {
    let permission = service::update_permission(&state, id, dto).await?;
    Ok(Json(permission))
}

pub async fn delete_permission(
    State(state): State<AppState>,
    Path(id): Path<PermissionId>,
) -> Result<StatusCode, AppError> {
    service::delete_permission(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
