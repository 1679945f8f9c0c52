//! Permission slug constants for the Carlot API.
//!
//! A permission slug is the unit of access control checked by the
//! authorization stage. Routes reference these constants instead of string
//! literals; the seeder uses [`ALL`] to populate the `permissions` table.
//!
//! # Example
//!
//! ```ignore
//! use carlot_core::permissions;
//!
//! let cars = Router::new().route(
//!     "/",
//!     require_permission(&state, permissions::CAR_READ, get(list_cars)),
//! );
//! ```

// =============================================================================
// Cars permissions
// =============================================================================

/// Permission to create cars
pub const CAR_CREATE: &str = "car-create";
/// Permission to read cars
pub const CAR_READ: &str = "car-read";
/// Permission to update cars
pub const CAR_UPDATE: &str = "car-update";
/// Permission to delete cars
pub const CAR_DELETE: &str = "car-delete";

// =============================================================================
// Users permissions
// =============================================================================

/// Permission to create users
pub const USER_CREATE: &str = "user-create";
/// Permission to read users
pub const USER_READ: &str = "user-read";
/// Permission to update users
pub const USER_UPDATE: &str = "user-update";
/// Permission to delete users
pub const USER_DELETE: &str = "user-delete";

// =============================================================================
// Roles permissions
// =============================================================================

/// Permission to create roles
pub const ROLE_CREATE: &str = "role-create";
/// Permission to read roles
pub const ROLE_READ: &str = "role-read";
/// Permission to update roles
pub const ROLE_UPDATE: &str = "role-update";
/// Permission to delete roles
pub const ROLE_DELETE: &str = "role-delete";
/// Permission to assign roles to users and grant permissions to roles
pub const ROLE_ASSIGN: &str = "role-assign";

// =============================================================================
// Permissions permissions
// =============================================================================

/// Permission to create permissions
pub const PERMISSION_CREATE: &str = "permission-create";
/// Permission to read permissions
pub const PERMISSION_READ: &str = "permission-read";
/// Permission to update permissions
pub const PERMISSION_UPDATE: &str = "permission-update";
/// Permission to delete permissions
pub const PERMISSION_DELETE: &str = "permission-delete";

/// Every built-in permission as `(slug, display name, module)`.
pub const ALL: &[(&str, &str, &str)] = &[
    (CAR_CREATE, "Create cars", "cars"),
    (CAR_READ, "Read cars", "cars"),
    (CAR_UPDATE, "Update cars", "cars"),
    (CAR_DELETE, "Delete cars", "cars"),
    (USER_CREATE, "Create users", "users"),
    (USER_READ, "Read users", "users"),
    (USER_UPDATE, "Update users", "users"),
    (USER_DELETE, "Delete users", "users"),
    (ROLE_CREATE, "Create roles", "roles"),
    (ROLE_READ, "Read roles", "roles"),
    (ROLE_UPDATE, "Update roles", "roles"),
    (ROLE_DELETE, "Delete roles", "roles"),
    (ROLE_ASSIGN, "Assign roles and grants", "roles"),
    (PERMISSION_CREATE, "Create permissions", "permissions"),
    (PERMISSION_READ, "Read permissions", "permissions"),
    (PERMISSION_UPDATE, "Update permissions", "permissions"),
    (PERMISSION_DELETE, "Delete permissions", "permissions"),
];
