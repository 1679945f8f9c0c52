//! Mapping of store failures onto HTTP errors.

use anyhow::anyhow;
use carlot_core::AppError;
use carlot_db::StoreError;

/// `NotFound` becomes 404 and `Conflict` 409. Every other failure is an
/// opaque 500.
pub fn store_error(err: StoreError) -> AppError {
    match err {
        StoreError::NotFound(entity) => AppError::not_found(anyhow!("{} not found", entity)),
        StoreError::Conflict(entity) => AppError::conflict(anyhow!("{} already exists", entity)),
        other => AppError::internal(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_store_errors_map_to_statuses() {
        assert_eq!(store_error(StoreError::NotFound("car")).status, StatusCode::NOT_FOUND);
        assert_eq!(store_error(StoreError::Conflict("role")).status, StatusCode::CONFLICT);

        let err = store_error(StoreError::Unavailable("down".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "internal server error");
    }
}
