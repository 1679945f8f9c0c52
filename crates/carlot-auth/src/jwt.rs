//! Issuing and validating bearer tokens.
//!
//! Tokens are HS256-signed JWTs carrying `{sub, iat, exp}`. Expiry is a hard
//! boundary: a token is rejected once `now >= exp`, with no leeway. The
//! comparison is done here rather than by `jsonwebtoken`, so that it runs
//! against an injectable [`Clock`].
//!
//! # Example
//!
//! ```ignore
//! use carlot_auth::TokenCodec;
//! use carlot_config::JwtConfig;
//!
//! let codec = TokenCodec::from_config(&JwtConfig::from_env());
//! let token = codec.issue(user_id)?;
//! assert_eq!(codec.validate(&token)?, user_id);
//! ```

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use carlot_config::JwtConfig;
use carlot_models::ids::UserId;

use crate::claims::Claims;
use crate::clock::{Clock, SystemClock};

#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed payload or expired. Callers never learn which.
    #[error("invalid token")]
    InvalidToken,
    #[error("token lifetime of {0}s overflows the expiry timestamp")]
    ExpiryOverflow(i64),
    #[error("failed to encode token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Encodes `{subject, now, now + ttl}` and signs it with `secret`.
pub fn issue_token_at(
    subject: UserId,
    secret: &str,
    ttl: i64,
    now: i64,
) -> Result<String, TokenError> {
    let exp = now.checked_add(ttl).ok_or(TokenError::ExpiryOverflow(ttl))?;
    let claims = Claims {
        sub: subject.to_string(),
        iat: now,
        exp,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verifies `token` against `secret` as of `now` and returns its subject.
pub fn validate_token_at(token: &str, secret: &str, now: i64) -> Result<UserId, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| TokenError::InvalidToken)?;

    if now >= claims.exp {
        return Err(TokenError::InvalidToken);
    }

    claims
        .sub
        .parse::<UserId>()
        .map_err(|_| TokenError::InvalidToken)
}

/// Token codec bound to a server secret, lifetime and clock.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Arc<str>,
    ttl: i64,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: impl Into<String>, ttl: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
            ttl,
            clock,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            config.secret.clone(),
            config.access_token_expiry,
            Arc::new(SystemClock),
        )
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Token lifetime in seconds.
    pub fn ttl(&self) -> i64 {
        self.ttl
    }

    pub fn issue(&self, subject: UserId) -> Result<String, TokenError> {
        issue_token_at(subject, &self.secret, self.ttl, self.clock.now())
    }

    pub fn validate(&self, token: &str) -> Result<UserId, TokenError> {
        validate_token_at(token, &self.secret, self.clock.now())
    }
}
