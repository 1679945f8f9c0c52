//! # Carlot Auth
//!
//! Bearer token claims and the token codec for the Carlot API.
//!
//! - [`claims`]: the `{sub, iat, exp}` claim set
//! - [`clock`]: the time source the codec validates against
//! - [`jwt`]: issuing and validating HS256 tokens

pub mod claims;
pub mod clock;
pub mod jwt;

pub use claims::Claims;
pub use clock::{Clock, FixedClock, SystemClock};
pub use jwt::{TokenCodec, TokenError, issue_token_at, validate_token_at};
