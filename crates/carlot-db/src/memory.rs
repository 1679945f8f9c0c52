//! In-memory store used by tests and local demos.
//!
//! Implements every persistence trait over a single `parking_lot::RwLock`.
//! Failure injection ([`MemoryStore::fail_permission_lookups`]) and an
//! artificial lookup delay ([`MemoryStore::set_lookup_delay`]) make the
//! fail-closed paths of the request pipeline testable without a database.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use carlot_models::cars::{Car, CreateCarDto, UpdateCarDto};
use carlot_models::ids::{CarId, PermissionId, RoleId, UserId};
use carlot_models::roles::{
    CreatePermissionDto, CreateRoleDto, Permission, Role, UpdatePermissionDto, UpdateRoleDto,
};
use carlot_models::users::{NewUser, UpdateUserDto, User, UserCredentials};
use chrono::Utc;
use parking_lot::RwLock;

use crate::store::{CarStore, CredentialStore, RbacStore, StoreError};

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: BTreeMap<UserId, (User, String)>,
    roles: BTreeMap<RoleId, Role>,
    permissions: BTreeMap<PermissionId, Permission>,
    role_user: HashSet<(UserId, RoleId)>,
    permission_role: HashSet<(RoleId, PermissionId)>,
    cars: BTreeMap<CarId, Car>,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    failing: AtomicBool,
    lookup_delay: RwLock<Option<Duration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `permissions_of` call fail with [`StoreError::Unavailable`].
    pub fn fail_permission_lookups(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Delay every `permissions_of` call, simulating a slow database.
    pub fn set_lookup_delay(&self, delay: Option<Duration>) {
        *self.lookup_delay.write() = delay;
    }

    /// Number of role assignments held by `user_id`.
    pub fn role_count(&self, user_id: UserId) -> usize {
        self.inner
            .read()
            .role_user
            .iter()
            .filter(|(user, _)| *user == user_id)
            .count()
    }
}

#[async_trait]
impl RbacStore for MemoryStore {
    async fn permissions_of(&self, user_id: UserId) -> Result<HashSet<String>, StoreError> {
        let delay = *self.lookup_delay.read();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "permission lookups disabled".to_string(),
            ));
        }

        let inner = self.inner.read();
        let roles: HashSet<RoleId> = inner
            .role_user
            .iter()
            .filter(|(user, _)| *user == user_id)
            .map(|(_, role)| *role)
            .collect();

        Ok(inner
            .permission_role
            .iter()
            .filter(|(role, _)| roles.contains(role))
            .filter_map(|(_, permission)| inner.permissions.get(permission))
            .map(|permission| permission.slug.clone())
            .collect())
    }

    async fn list_roles(&self) -> Result<Vec<Role>, StoreError> {
        let mut roles: Vec<Role> = self.inner.read().roles.values().cloned().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    async fn create_role(&self, dto: CreateRoleDto) -> Result<Role, StoreError> {
        let mut inner = self.inner.write();
        if inner.roles.values().any(|role| role.slug == dto.slug) {
            return Err(StoreError::Conflict("role"));
        }

        let now = Utc::now();
        let role = Role {
            id: RoleId(inner.next_id()),
            name: dto.name,
            slug: dto.slug,
            description: dto.description,
            created_at: now,
            updated_at: now,
        };
        inner.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn find_role_by_slug(&self, slug: &str) -> Result<Option<Role>, StoreError> {
        Ok(self
            .inner
            .read()
            .roles
            .values()
            .find(|role| role.slug == slug)
            .cloned())
    }

    async fn get_role(&self, id: RoleId) -> Result<Option<Role>, StoreError> {
        Ok(self.inner.read().roles.get(&id).cloned())
    }

    async fn update_role(&self, id: RoleId, dto: UpdateRoleDto) -> Result<Option<Role>, StoreError> {
        let mut inner = self.inner.write();
        if let Some(slug) = &dto.slug {
            if inner
                .roles
                .values()
                .any(|role| role.id != id && &role.slug == slug)
            {
                return Err(StoreError::Conflict("role"));
            }
        }

        let Some(role) = inner.roles.get_mut(&id) else {
            return Ok(None);
        };
        dto.apply_to(role);
        role.updated_at = Utc::now();
        Ok(Some(role.clone()))
    }

    async fn delete_role(&self, id: RoleId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write();
        if inner.roles.remove(&id).is_none() {
            return Ok(false);
        }
        inner.role_user.retain(|(_, role)| *role != id);
        inner.permission_role.retain(|(role, _)| *role != id);
        Ok(true)
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>, StoreError> {
        let mut permissions: Vec<Permission> =
            self.inner.read().permissions.values().cloned().collect();
        permissions.sort_by(|a, b| (&a.module, &a.name).cmp(&(&b.module, &b.name)));
        Ok(permissions)
    }

    async fn create_permission(&self, dto: CreatePermissionDto) -> Result<Permission, StoreError> {
        let mut inner = self.inner.write();
        if inner.permissions.values().any(|p| p.slug == dto.slug) {
            return Err(StoreError::Conflict("permission"));
        }

        let now = Utc::now();
        let permission = Permission {
            id: PermissionId(inner.next_id()),
            name: dto.name,
            slug: dto.slug,
            module: dto.module,
            created_at: now,
            updated_at: now,
        };
        inner.permissions.insert(permission.id, permission.clone());
        Ok(permission)
    }

    async fn get_permission(&self, id: PermissionId) -> Result<Option<Permission>, StoreError> {
        Ok(self.inner.read().permissions.get(&id).cloned())
    }

    async fn update_permission(
        &self,
        id: PermissionId,
        dto: UpdatePermissionDto,
    ) -> Result<Option<Permission>, StoreError> {
        let mut inner = self.inner.write();
        if let Some(slug) = &dto.slug {
            if inner
                .permissions
                .values()
                .any(|p| p.id != id && &p.slug == slug)
            {
                return Err(StoreError::Conflict("permission"));
            }
        }

        let Some(permission) = inner.permissions.get_mut(&id) else {
            return Ok(None);
        };
        dto.apply_to(permission);
        permission.updated_at = Utc::now();
        Ok(Some(permission.clone()))
    }

    async fn delete_permission(&self, id: PermissionId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write();
        if inner.permissions.remove(&id).is_none() {
            return Ok(false);
        }
        inner.permission_role.retain(|(_, permission)| *permission != id);
        Ok(true)
    }

    async fn assign_role(&self, user_id: UserId, role_id: RoleId) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if !inner.users.contains_key(&user_id) {
            return Err(StoreError::NotFound("user"));
        }
        if !inner.roles.contains_key(&role_id) {
            return Err(StoreError::NotFound("role"));
        }
        inner.role_user.insert((user_id, role_id));
        Ok(())
    }

    async fn grant_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if !inner.roles.contains_key(&role_id) {
            return Err(StoreError::NotFound("role"));
        }
        if !inner.permissions.contains_key(&permission_id) {
            return Err(StoreError::NotFound("permission"));
        }
        inner.permission_role.insert((role_id, permission_id));
        Ok(())
    }

    async fn revoke_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> Result<bool, StoreError> {
        Ok(self
            .inner
            .write()
            .permission_role
            .remove(&(role_id, permission_id)))
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        Ok(self
            .inner
            .read()
            .users
            .values()
            .find(|(user, _)| user.email.eq_ignore_ascii_case(email))
            .map(|(user, hash)| UserCredentials {
                id: user.id,
                email: user.email.clone(),
                password_hash: hash.clone(),
                is_active: user.is_active,
            }))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write();
        if inner
            .users
            .values()
            .any(|(user, _)| user.email.eq_ignore_ascii_case(&new_user.email))
        {
            return Err(StoreError::Conflict("user"));
        }

        let user = User {
            id: UserId(inner.next_id()),
            name: new_user.name,
            email: new_user.email,
            is_active: true,
            created_at: Utc::now(),
        };
        inner
            .users
            .insert(user.id, (user.clone(), new_user.password_hash));
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self
            .inner
            .read()
            .users
            .values()
            .map(|(user, _)| user.clone())
            .collect())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().users.get(&id).map(|(user, _)| user.clone()))
    }

    async fn update_user(&self, id: UserId, dto: UpdateUserDto) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.write();
        if let Some(email) = &dto.email {
            if inner
                .users
                .values()
                .any(|(user, _)| user.id != id && user.email.eq_ignore_ascii_case(email))
            {
                return Err(StoreError::Conflict("user"));
            }
        }

        let Some((user, _)) = inner.users.get_mut(&id) else {
            return Ok(None);
        };
        dto.apply_to(user);
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write();
        if inner.users.remove(&id).is_none() {
            return Ok(false);
        }
        inner.role_user.retain(|(user, _)| *user != id);
        Ok(true)
    }
}

#[async_trait]
impl CarStore for MemoryStore {
    async fn list_cars(&self) -> Result<Vec<Car>, StoreError> {
        Ok(self.inner.read().cars.values().cloned().collect())
    }

    async fn get_car(&self, id: CarId) -> Result<Option<Car>, StoreError> {
        Ok(self.inner.read().cars.get(&id).cloned())
    }

    async fn create_car(&self, dto: CreateCarDto) -> Result<Car, StoreError> {
        let mut inner = self.inner.write();
        if inner.cars.values().any(|car| car.ref_no == dto.ref_no) {
            return Err(StoreError::Conflict("car"));
        }

        let now = Utc::now();
        let car = Car {
            id: CarId(inner.next_id()),
            ref_no: dto.ref_no,
            make: dto.make,
            model: dto.model,
            year: dto.year,
            color: dto.color,
            mileage_km: dto.mileage_km,
            status: dto.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        inner.cars.insert(car.id, car.clone());
        Ok(car)
    }

    async fn update_car(&self, id: CarId, dto: UpdateCarDto) -> Result<Option<Car>, StoreError> {
        let mut inner = self.inner.write();
        let Some(car) = inner.cars.get_mut(&id) else {
            return Ok(None);
        };
        dto.apply_to(car);
        car.updated_at = Utc::now();
        Ok(Some(car.clone()))
    }

    async fn delete_car(&self, id: CarId) -> Result<bool, StoreError> {
        Ok(self.inner.write().cars.remove(&id).is_some())
    }
}
