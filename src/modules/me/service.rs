use carlot_core::{AppError, AuthError};
use carlot_models::roles::UserPermissionsResponse;
use tracing::instrument;

use crate::middleware::Identity;
use crate::state::AppState;

/// Effective permission slugs of the caller, sorted.
#[instrument(skip(state))]
pub async fn my_permissions(
    state: &AppState,
    identity: Identity,
) -> Result<UserPermissionsResponse, AppError> {
    let permissions = state
        .resolver
        .sorted_permissions_of(identity.user_id)
        .await
        .map_err(|_| AuthError::PermissionCheckFailed)?;

    Ok(UserPermissionsResponse {
        user_id: identity.user_id,
        permissions,
    })
}
