//! Feature modules. Each one has a `router` (routes and their required
//! permissions), a `controller` (HTTP handlers) and a `service` (store calls).

pub mod auth;
pub mod cars;
pub mod health;
pub mod me;
pub mod permissions;
pub mod roles;
pub mod users;
