use anyhow::anyhow;
use carlot_core::AppError;
use carlot_models::ids::{PermissionId, RoleId};
use carlot_models::roles::{AssignRoleDto, CreateRoleDto, Role, UpdateRoleDto};
use tracing::instrument;

use crate::errors::store_error;
use crate::middleware::Identity;
use crate::state::AppState;

fn role_not_found() -> AppError {
    AppError::not_found(anyhow!("Role not found"))
}

#[instrument(skip(state))]
pub async fn list_roles(state: &AppState) -> Result<Vec<Role>, AppError> {
    state.rbac.list_roles().await.map_err(store_error)
}

#[instrument(skip(state))]
pub async fn create_role(state: &AppState, dto: CreateRoleDto) -> Result<Role, AppError> {
    let role = state.rbac.create_role(dto).await.map_err(store_error)?;
    tracing::info!(role_id = %role.id, slug = %role.slug, "role created");
    Ok(role)
}

#[instrument(skip(state))]
pub async fn get_role(state: &AppState, id: RoleId) -> Result<Role, AppError> {
    state
        .rbac
        .get_role(id)
        .await
        .map_err(store_error)?
        .ok_or_else(role_not_found)
}

#[instrument(skip(state))]
pub async fn update_role(state: &AppState, id: RoleId, dto: UpdateRoleDto) -> Result<Role, AppError> {
    state
        .rbac
        .update_role(id, dto)
        .await
        .map_err(store_error)?
        .ok_or_else(role_not_found)
}

/// Holders of the role lose its permissions on their next request.
#[instrument(skip(state))]
pub async fn delete_role(state: &AppState, id: RoleId) -> Result<(), AppError> {
    if !state.rbac.delete_role(id).await.map_err(store_error)? {
        return Err(role_not_found());
    }
    tracing::info!(role_id = %id, "role deleted");
    Ok(())
}

/// Idempotent: assigning a role the user already holds succeeds.
#[instrument(skip(state))]
pub async fn assign_role(
    state: &AppState,
    assigned_by: Identity,
    dto: AssignRoleDto,
) -> Result<(), AppError> {
    state
        .rbac
        .assign_role(dto.user_id, dto.role_id)
        .await
        .map_err(store_error)?;

    tracing::info!(
        user_id = %dto.user_id,
        role_id = %dto.role_id,
        assigned_by = %assigned_by.user_id,
        "role assigned"
    );
    Ok(())
}

/// Idempotent, like [`assign_role`].
#[instrument(skip(state))]
pub async fn grant_permission(
    state: &AppState,
    role_id: RoleId,
    permission_id: PermissionId,
) -> Result<(), AppError> {
    state
        .rbac
        .grant_permission(role_id, permission_id)
        .await
        .map_err(store_error)
}

#[instrument(skip(state))]
pub async fn revoke_permission(
    state: &AppState,
    role_id: RoleId,
    permission_id: PermissionId,
) -> Result<(), AppError> {
    let removed = state
        .rbac
        .revoke_permission(role_id, permission_id)
        .await
        .map_err(store_error)?;

    if !removed {
        return Err(AppError::not_found(anyhow!("Permission is not granted to role")));
    }

    tracing::info!(role_id = %role_id, permission_id = %permission_id, "permission revoked");
    Ok(())
}
