use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use carlot_core::AuthError;
use carlot_models::ids::UserId;

use crate::state::AppState;

/// The authenticated subject of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
}

/// Extract the token from an `Authorization` header value.
///
/// The scheme is case-sensitive and followed by exactly one space. The
/// token must be non-empty and contain no further spaces.
pub fn parse_bearer(value: &str) -> Result<&str, AuthError> {
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedCredential)?;

    if token.is_empty() || token.contains(' ') {
        return Err(AuthError::MalformedCredential);
    }

    Ok(token)
}

/// Authentication stage. Rejects requests without a valid bearer token and
/// binds the token subject as [`Identity`] for everything downstream.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::debug!("missing authorization header");
            AuthError::MissingCredential
        })?
        .to_str()
        .map_err(|_| {
            tracing::debug!("authorization header is not visible ASCII");
            AuthError::MalformedCredential
        })?;

    let token = parse_bearer(value).inspect_err(|_| {
        tracing::debug!("malformed authorization header");
    })?;

    let user_id = state.codec.validate(token).map_err(|_| {
        tracing::debug!("bearer token rejected");
        AuthError::InvalidCredential
    })?;

    req.extensions_mut().insert(Identity { user_id });
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .copied()
            .ok_or(AuthError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_accepts_token() {
        assert_eq!(parse_bearer("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_parse_bearer_rejects_other_schemes() {
        assert_eq!(
            parse_bearer("Basic dXNlcjpwYXNz"),
            Err(AuthError::MalformedCredential)
        );
        assert_eq!(
            parse_bearer("bearer abc"),
            Err(AuthError::MalformedCredential)
        );
    }

    #[test]
    fn test_parse_bearer_rejects_empty_and_spaced_tokens() {
        assert_eq!(parse_bearer("Bearer "), Err(AuthError::MalformedCredential));
        assert_eq!(parse_bearer("Bearer"), Err(AuthError::MalformedCredential));
        assert_eq!(
            parse_bearer("Bearer  abc"),
            Err(AuthError::MalformedCredential)
        );
        assert_eq!(
            parse_bearer("Bearer abc def"),
            Err(AuthError::MalformedCredential)
        );
    }
}
