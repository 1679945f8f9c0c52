//! Application error types with HTTP response conversion.
//!
//! [`AppError`] is the single rejection type used by handlers, extractors and
//! middleware. It renders as `{"error": <message>, "code": <machine code>}`.
//!
//! [`AuthError`] is the failure taxonomy of the request pipeline
//! (authentication, authorization). Each variant maps to a fixed status,
//! code and message so that clients can never tell a forged token from an
//! expired or malformed one.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generic message rendered for 500 responses built from internal errors.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Message shared by every rejected (but present) bearer credential.
pub const INVALID_CREDENTIAL_MESSAGE: &str = "invalid or expired token";

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub code: &'static str,
    /// Whether `error` may be shown to the client. Internal causes are
    /// logged and replaced with [`INTERNAL_ERROR_MESSAGE`].
    expose: bool,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            code: default_code(status),
            expose: !status.is_server_error(),
        }
    }

    fn message(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: Error::msg(message.into()),
            code,
            expose: true,
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = code;
        self
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::message(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::message(StatusCode::FORBIDDEN, "forbidden", message)
    }

    /// A 500 whose message is safe to show to the client.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::message(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }

    /// The text rendered in the response body.
    pub fn public_message(&self) -> String {
        if self.expose {
            self.error.to_string()
        } else {
            INTERNAL_ERROR_MESSAGE.to_string()
        }
    }
}

fn default_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "bad_request",
        StatusCode::UNAUTHORIZED => "unauthorized",
        StatusCode::FORBIDDEN => "forbidden",
        StatusCode::NOT_FOUND => "not_found",
        StatusCode::CONFLICT => "conflict",
        StatusCode::UNPROCESSABLE_ENTITY => "validation_failed",
        _ if status.is_server_error() => "internal_error",
        _ => "error",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "request failed");
        }

        let body = Json(ErrorBody {
            error: self.public_message(),
            code: self.code.to_string(),
        });

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

/// Failures of the authentication and authorization stages.
///
/// Deliberately not a `std::error::Error`: it converts into [`AppError`]
/// through its own `From` impl rather than the blanket `anyhow` one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header on a protected route.
    MissingCredential,
    /// Header present but not of the form `Bearer <token>`.
    MalformedCredential,
    /// Token failed signature, payload or expiry validation.
    InvalidCredential,
    /// Authenticated, but the required permission is not granted.
    Forbidden(String),
    /// The authorization stage ran without an identity bound to the request.
    Unauthenticated,
    /// The permission graph could not be read; access is denied.
    PermissionCheckFailed,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "missing credential"),
            Self::MalformedCredential => write!(f, "malformed credential"),
            Self::InvalidCredential => write!(f, "invalid credential"),
            Self::Forbidden(slug) => write!(f, "missing required permission `{}`", slug),
            Self::Unauthenticated => write!(f, "no identity bound to request"),
            Self::PermissionCheckFailed => write!(f, "permission check failed"),
        }
    }
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredential | Self::MalformedCredential | Self::InvalidCredential => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Unauthenticated | Self::PermissionCheckFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential => {
                AppError::unauthorized("authorization header is required")
            }
            AuthError::MalformedCredential | AuthError::InvalidCredential => {
                AppError::unauthorized(INVALID_CREDENTIAL_MESSAGE)
            }
            AuthError::Forbidden(_) => AppError::forbidden("insufficient permissions"),
            AuthError::Unauthenticated => AppError::internal(anyhow::anyhow!("{}", err)),
            AuthError::PermissionCheckFailed => {
                AppError::internal_error("failed to check permissions")
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
