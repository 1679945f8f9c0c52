//! # Carlot Models
//!
//! Domain models and DTOs for the Carlot API.
//!
//! - [`ids`]: strongly-typed `i64` ID newtypes
//! - [`auth`]: login DTOs
//! - [`cars`]: car inventory records and DTOs
//! - [`roles`]: roles, permissions and assignment DTOs
//! - [`users`]: user records and credentials

pub mod auth;
pub mod cars;
pub mod ids;
pub mod roles;
pub mod users;

pub use ids::{CarId, PermissionId, RoleId, UserId};
