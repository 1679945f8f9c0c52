//! Persistence interfaces.
//!
//! Handlers and the permission resolver depend on these traits only; the
//! concrete store is chosen once at startup and injected through the
//! application state. [`crate::PgStore`] backs production, and
//! [`crate::MemoryStore`] backs tests and local demos.

use std::collections::HashSet;

use async_trait::async_trait;
use carlot_models::cars::{Car, CreateCarDto, UpdateCarDto};
use carlot_models::ids::{CarId, PermissionId, RoleId, UserId};
use carlot_models::roles::{
    CreatePermissionDto, CreateRoleDto, Permission, Role, UpdatePermissionDto, UpdateRoleDto,
};
use carlot_models::users::{NewUser, UpdateUserDto, User, UserCredentials};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0} already exists")]
    Conflict(&'static str),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// The user → role → permission graph.
#[async_trait]
pub trait RbacStore: Send + Sync {
    /// Distinct permission slugs reachable through the user's roles.
    /// A user without roles (or unknown to the store) yields an empty set.
    async fn permissions_of(&self, user_id: UserId) -> Result<HashSet<String>, StoreError>;

    async fn list_roles(&self) -> Result<Vec<Role>, StoreError>;

    async fn create_role(&self, dto: CreateRoleDto) -> Result<Role, StoreError>;

    async fn find_role_by_slug(&self, slug: &str) -> Result<Option<Role>, StoreError>;

    async fn get_role(&self, id: RoleId) -> Result<Option<Role>, StoreError>;

    async fn update_role(&self, id: RoleId, dto: UpdateRoleDto) -> Result<Option<Role>, StoreError>;

    /// Removes the role with its assignments and grants. Returns whether a
    /// role was deleted.
    async fn delete_role(&self, id: RoleId) -> Result<bool, StoreError>;

    async fn list_permissions(&self) -> Result<Vec<Permission>, StoreError>;

    async fn create_permission(&self, dto: CreatePermissionDto) -> Result<Permission, StoreError>;

    async fn get_permission(&self, id: PermissionId) -> Result<Option<Permission>, StoreError>;

    async fn update_permission(
        &self,
        id: PermissionId,
        dto: UpdatePermissionDto,
    ) -> Result<Option<Permission>, StoreError>;

    /// Removes the permission from the catalogue and from every role.
    async fn delete_permission(&self, id: PermissionId) -> Result<bool, StoreError>;

    /// Idempotent: assigning an already held role is a no-op.
    async fn assign_role(&self, user_id: UserId, role_id: RoleId) -> Result<(), StoreError>;

    /// Idempotent: granting an already granted permission is a no-op.
    async fn grant_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> Result<(), StoreError>;

    /// Returns whether a grant was removed.
    async fn revoke_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError>;

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn update_user(&self, id: UserId, dto: UpdateUserDto) -> Result<Option<User>, StoreError>;

    /// Deletes the user and drops its role assignments, so a token issued
    /// before the deletion resolves to no permissions.
    async fn delete_user(&self, id: UserId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait CarStore: Send + Sync {
    async fn list_cars(&self) -> Result<Vec<Car>, StoreError>;

    async fn get_car(&self, id: CarId) -> Result<Option<Car>, StoreError>;

    async fn create_car(&self, dto: CreateCarDto) -> Result<Car, StoreError>;

    async fn update_car(&self, id: CarId, dto: UpdateCarDto) -> Result<Option<Car>, StoreError>;

    /// Returns whether a car was deleted.
    async fn delete_car(&self, id: CarId) -> Result<bool, StoreError>;
}
