//! Request pipeline middleware.
//!
//! - [`auth`]: bearer token authentication, binds an [`Identity`] to the request
//! - [`permission`]: per-route permission enforcement
//!
//! # Pipeline
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::authenticate`] validates the token and stores the [`Identity`]
//!    in the request extensions
//! 3. [`permission::authorize`] resolves the user's permissions and checks
//!    the slug configured for the route
//! 4. The handler runs
//!
//! # Example
//!
//! ```ignore
//! use axum::routing::delete;
//! use carlot_core::permissions::CAR_DELETE;
//! use crate::middleware::permission::require_permission;
//!
//! let route = require_permission(&state, CAR_DELETE, delete(delete_car));
//! ```

pub mod auth;
pub mod permission;

pub use auth::{Identity, authenticate};
pub use permission::{PermissionGate, authorize, require_permission};
