//! # Carlot Core
//!
//! Core types shared by every Carlot crate.
//!
//! - [`errors`]: [`AppError`] with HTTP response conversion and the
//!   [`AuthError`] taxonomy of the request pipeline
//! - [`password`]: bcrypt password hashing and verification
//! - [`permissions`]: permission slug constants
//!
//! # Example
//!
//! ```ignore
//! use carlot_core::{AppError, AuthError};
//!
//! let error = AppError::not_found(anyhow::anyhow!("car not found"));
//! let rejection: AppError = AuthError::MissingCredential.into();
//! ```

pub mod errors;
pub mod password;
pub mod permissions;

pub use errors::{AppError, AuthError, ErrorBody, INTERNAL_ERROR_MESSAGE, INVALID_CREDENTIAL_MESSAGE};
pub use password::{hash_password, verify_password};
