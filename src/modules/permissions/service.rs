use anyhow::anyhow;
use carlot_core::AppError;
use carlot_models::ids::PermissionId;
use carlot_models::roles::{CreatePermissionDto, Permission, UpdatePermissionDto};
use tracing::instrument;

use crate::errors::store_error;
use crate::state::AppState;

fn permission_not_found() -> AppError {
    AppError::not_found(anyhow!("Permission not found"))
}

#[instrument(skip(state))]
pub async fn list_permissions(state: &AppState) -> Result<Vec<Permission>, AppError> {
    state.rbac.list_permissions().await.map_err(store_error)
}

#[instrument(skip(state))]
pub async fn create_permission(
    state: &AppState,
    dto: CreatePermissionDto,
) -> Result<Permission, AppError> {
    let permission = state.rbac.create_permission(dto).await.map_err(store_error)?;
    tracing::info!(slug = %permission.slug, "permission created");
    Ok(permission)
}

#[instrument(skip(state))]
pub async fn get_permission(state: &AppState, id: PermissionId) -> Result<Permission, AppError> {
    state
        .rbac
        .get_permission(id)
        .await
        .map_err(store_error)?
        .ok_or_else(permission_not_found)
}

#[instrument(skip(state))]
pub async fn update_permission(
    state: &AppState,
    id: PermissionId,
    dto: UpdatePermissionDto,
) -> Result<Permission, AppError> {
    state
        .rbac
        .update_permission(id, dto)
        .await
        .map_err(store_error)?
        .ok_or_else(permission_not_found)
}

#[instrument(skip(state))]
pub async fn delete_permission(state: &AppState, id: PermissionId) -> Result<(), AppError> {
    if !state.rbac.delete_permission(id).await.map_err(store_error)? {
        return Err(permission_not_found());
    }
    tracing::info!(permission_id = %id, "permission deleted");
    Ok(())
}
