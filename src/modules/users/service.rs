use anyhow::anyhow;
use carlot_core::AppError;
use carlot_core::password::hash_password_with_cost;
use carlot_models::ids::UserId;
use carlot_models::users::{CreateUserDto, NewUser, UpdateUserDto, User};
use tracing::instrument;

use crate::errors::store_error;
use crate::state::AppState;

fn user_not_found() -> AppError {
    AppError::not_found(anyhow!("User not found"))
}

#[instrument(skip(state))]
pub async fn list_users(state: &AppState) -> Result<Vec<User>, AppError> {
    state.credentials.list_users().await.map_err(store_error)
}

#[instrument(skip(state))]
pub async fn get_user(state: &AppState, id: UserId) -> Result<User, AppError> {
    state
        .credentials
        .get_user(id)
        .await
        .map_err(store_error)?
        .ok_or_else(user_not_found)
}

/// Emails are stored lowercase; a taken email is a 409.
#[instrument(skip(state))]
pub async fn create_user(state: &AppState, dto: CreateUserDto) -> Result<User, AppError> {
    let password_hash = hash_password_with_cost(&dto.password, state.server_config.bcrypt_cost)?;

    let user = state
        .credentials
        .create_user(NewUser {
            name: dto.name,
            email: dto.email.to_lowercase(),
            password_hash,
        })
        .await
        .map_err(store_error)?;

    tracing::info!(user_id = %user.id, "user created");
    Ok(user)
}

#[instrument(skip(state))]
pub async fn update_user(state: &AppState, id: UserId, dto: UpdateUserDto) -> Result<User, AppError> {
    state
        .credentials
        .update_user(id, dto)
        .await
        .map_err(store_error)?
        .ok_or_else(user_not_found)
}

#[instrument(skip(state))]
pub async fn delete_user(state: &AppState, id: UserId) -> Result<(), AppError> {
    if !state.credentials.delete_user(id).await.map_err(store_error)? {
        return Err(user_not_found());
    }
    tracing::info!(user_id = %id, "user deleted");
    Ok(())
}
