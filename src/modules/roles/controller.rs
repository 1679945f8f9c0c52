use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use carlot_core::AppError;
use carlot_models::ids::{PermissionId, RoleId};
use carlot_models::roles::{AssignRoleDto, CreateRoleDto, GrantPermissionDto, Role, UpdateRoleDto};

use crate::middleware::Identity;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service;

pub async fn list_roles(State(state): State<AppState>) -> Result<Json<Vec<Role>>, AppError> {
    let roles = service::list_roles(&state).await?;
    Ok(Json(roles))
}

pub async fn create_role(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateRoleDto>,
) -> Result<(StatusCode, Json<Role>), AppError> {
    let role = service::create_role(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<RoleId>,
) -> Result<Json<Role>, AppError> {
    let role = service::get_role(&state, id).await?;
    Ok(Json(role))
}

pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<RoleId>,
    ValidatedJson(dto): ValidatedJson<UpdateRoleDto>,
) -> Result<Json<Role>, AppError> {
    let role = service::update_role(&state, id, dto).await?;
    Ok(Json(role))
}

pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<RoleId>,
) -> Result<StatusCode, AppError> {
    service::delete_role(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn assign_role(
    State(state): State<AppState>,
    identity: Identity,
    ValidatedJson(dto): ValidatedJson<AssignRoleDto>,
) -> Result<StatusCode, AppError> {
    service::assign_role(&state, identity, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn grant_permission(
    State(state): State<AppState>,
    Path(role_id): Path<RoleId>,
    ValidatedJson(dto): ValidatedJson<GrantPermissionDto>,
) -> Result<StatusCode, AppError> {
    service::grant_permission(&state, role_id, dto.permission_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn revoke_permission(
    State(state): State<AppState>,
    Path((role_id, permission_id)): Path<(RoleId, PermissionId)>,
) -> Result<StatusCode, AppError> {
    service::revoke_permission(&state, role_id, permission_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
