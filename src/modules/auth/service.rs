use std::sync::LazyLock;

use carlot_core::{AppError, hash_password, verify_password};
use carlot_models::auth::{LoginRequest, LoginResponse};
use tracing::instrument;

use crate::errors::store_error;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Verified instead of a real hash when the account is unknown or inactive,
/// so every rejected login costs one bcrypt check.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("carlot-no-such-account").ok());

fn burn_password_check(password: &str) {
    if let Some(dummy) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, dummy);
    }
}

/// Exchange an email and password for a bearer token.
///
/// Unknown emails, inactive accounts and wrong passwords all produce the
/// same 401.
#[instrument(skip(state, dto), fields(email = %dto.email))]
pub async fn login(state: &AppState, dto: LoginRequest) -> Result<LoginResponse, AppError> {
    let credentials = state
        .credentials
        .find_credentials(&dto.email)
        .await
        .map_err(store_error)?;

    let Some(credentials) = credentials.filter(|c| c.is_active) else {
        burn_password_check(&dto.password);
        tracing::debug!("login rejected: unknown or inactive account");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(&dto.password, &credentials.password_hash)? {
        tracing::debug!(user_id = %credentials.id, "login rejected: wrong password");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state.codec.issue(credentials.id)?;
    tracing::info!(user_id = %credentials.id, "user logged in");

    Ok(LoginResponse::bearer(token, state.codec.ttl()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_hash_never_matches() {
        let dummy = DUMMY_HASH.as_deref().unwrap();
        assert!(dummy.starts_with("$2"));
        assert!(!verify_password("testpass123", dummy).unwrap());
    }
}
