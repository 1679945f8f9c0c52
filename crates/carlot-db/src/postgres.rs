//! PostgreSQL-backed store.
//!
//! Queries use the runtime-checked `sqlx::query*` functions. Join inserts
//! rely on `ON CONFLICT DO NOTHING`, which makes role assignment and
//! permission grants idempotent at the database level.

use std::collections::HashSet;

use async_trait::async_trait;
use carlot_models::cars::{Car, CreateCarDto, UpdateCarDto};
use carlot_models::ids::{CarId, PermissionId, RoleId, UserId};
use carlot_models::roles::{
    CreatePermissionDto, CreateRoleDto, Permission, Role, UpdatePermissionDto, UpdateRoleDto,
};
use carlot_models::users::{NewUser, UpdateUserDto, User, UserCredentials};
use sqlx::PgPool;
use tracing::instrument;

use crate::store::{CarStore, CredentialStore, RbacStore, StoreError};

const CAR_COLUMNS: &str =
    "id, ref_no, make, model, year, color, mileage_km, status, created_at, updated_at";
const ROLE_COLUMNS: &str = "id, name, slug, description, created_at, updated_at";
const PERMISSION_COLUMNS: &str = "id, name, slug, module, created_at, updated_at";
const USER_COLUMNS: &str = "id, name, email, is_active, created_at";

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps unique and foreign-key violations onto domain errors.
fn classify(err: sqlx::Error, entity: &'static str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(entity);
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::NotFound(entity);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl RbacStore for PgStore {
    #[instrument(skip(self))]
    async fn permissions_of(&self, user_id: UserId) -> Result<HashSet<String>, StoreError> {
        let slugs: Vec<String> = sqlx::query_scalar(
            r#"SELECT DISTINCT p.slug
            FROM permissions p
            JOIN permission_role pr ON p.id = pr.permission_id
            JOIN role_user ru ON pr.role_id = ru.role_id
            WHERE ru.user_id = $1"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(slugs.into_iter().collect())
    }

    #[instrument(skip(self))]
    async fn list_roles(&self) -> Result<Vec<Role>, StoreError> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT id, name, slug, description, created_at, updated_at FROM roles ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    #[instrument(skip(self))]
    async fn create_role(&self, dto: CreateRoleDto) -> Result<Role, StoreError> {
        sqlx::query_as::<_, Role>(
            r#"INSERT INTO roles (name, slug, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, description, created_at, updated_at"#,
        )
        .bind(&dto.name)
        .bind(&dto.slug)
        .bind(&dto.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, "role"))
    }

    #[instrument(skip(self))]
    async fn find_role_by_slug(&self, slug: &str) -> Result<Option<Role>, StoreError> {
        let role = sqlx::query_as::<_, Role>(
            "SELECT id, name, slug, description, created_at, updated_at FROM roles WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(role)
    }

    #[instrument(skip(self))]
    async fn get_role(&self, id: RoleId) -> Result<Option<Role>, StoreError> {
        let role = sqlx::query_as::<_, Role>(&format!("SELECT {ROLE_COLUMNS} FROM roles WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role)
    }

    #[instrument(skip(self))]
    async fn update_role(&self, id: RoleId, dto: UpdateRoleDto) -> Result<Option<Role>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Role>(&format!(
            "SELECT {ROLE_COLUMNS} FROM roles WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut role) = current else {
            return Ok(None);
        };
        dto.apply_to(&mut role);

        let updated = sqlx::query_as::<_, Role>(&format!(
            r#"UPDATE roles
            SET name = $2, slug = $3, description = $4, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING {ROLE_COLUMNS}"#
        ))
        .bind(id)
        .bind(&role.name)
        .bind(&role.slug)
        .bind(&role.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify(e, "role"))?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Assignments and grants go with the role through `ON DELETE CASCADE`.
    #[instrument(skip(self))]
    async fn delete_role(&self, id: RoleId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_permissions(&self) -> Result<Vec<Permission>, StoreError> {
        let permissions = sqlx::query_as::<_, Permission>(
            r#"SELECT id, name, slug, module, created_at, updated_at
            FROM permissions ORDER BY module, name"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(permissions)
    }

    #[instrument(skip(self))]
    async fn create_permission(&self, dto: CreatePermissionDto) -> Result<Permission, StoreError> {
        sqlx::query_as::<_, Permission>(
            r#"INSERT INTO permissions (name, slug, module)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, module, created_at, updated_at"#,
        )
        .bind(&dto.name)
        .bind(&dto.slug)
        .bind(&dto.module)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, "permission"))
    }

    #[instrument(skip(self))]
    async fn get_permission(&self, id: PermissionId) -> Result<Option<Permission>, StoreError> {
        let permission = sqlx::query_as::<_, Permission>(&format!(
            "SELECT {PERMISSION_COLUMNS} FROM permissions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(permission)
    }

    #[instrument(skip(self))]
    async fn update_permission(
        &self,
        id: PermissionId,
        dto: UpdatePermissionDto,
    ) -> Result<Option<Permission>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Permission>(&format!(
            "SELECT {PERMISSION_COLUMNS} FROM permissions WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut permission) = current else {
            return Ok(None);
        };
        dto.apply_to(&mut permission);

        let updated = sqlx::query_as::<_, Permission>(&format!(
            r#"UPDATE permissions
            SET name = $2, slug = $3, module = $4, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING {PERMISSION_COLUMNS}"#
        ))
        .bind(id)
        .bind(&permission.name)
        .bind(&permission.slug)
        .bind(&permission.module)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify(e, "permission"))?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    #[instrument(skip(self))]
    async fn delete_permission(&self, id: PermissionId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn assign_role(&self, user_id: UserId, role_id: RoleId) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO role_user (user_id, role_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&self.pool)
        .await
        .map_err(|e| classify(e, "user or role"))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn grant_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO permission_role (role_id, permission_id)
            VALUES ($1, $2) ON CONFLICT DO NOTHING"#,
        )
        .bind(role_id)
        .bind(permission_id)
        .execute(&self.pool)
        .await
        .map_err(|e| classify(e, "role or permission"))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn revoke_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> Result<bool, StoreError> {
        let result =
            sqlx::query("DELETE FROM permission_role WHERE role_id = $1 AND permission_id = $2")
                .bind(role_id)
                .bind(permission_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    #[instrument(skip(self))]
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            r#"SELECT id, email, password_hash, is_active
            FROM users WHERE lower(email) = lower($1) AND deleted_at IS NULL"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(credentials)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, is_active, created_at"#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, "user"))
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn update_user(&self, id: UserId, dto: UpdateUserDto) -> Result<Option<User>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut user) = current else {
            return Ok(None);
        };
        dto.apply_to(&mut user);

        let updated = sqlx::query_as::<_, User>(&format!(
            r#"UPDATE users
            SET name = $2, email = $3, is_active = $4, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING {USER_COLUMNS}"#
        ))
        .bind(id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.is_active)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify(e, "user"))?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Soft delete. The row stays for auditing, but it no longer logs in,
    /// lists, or holds roles.
    #[instrument(skip(self))]
    async fn delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"UPDATE users
            SET deleted_at = CURRENT_TIMESTAMP, is_active = FALSE, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND deleted_at IS NULL"#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM role_user WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}

#[async_trait]
impl CarStore for PgStore {
    #[instrument(skip(self))]
    async fn list_cars(&self) -> Result<Vec<Car>, StoreError> {
        let cars = sqlx::query_as::<_, Car>(&format!("SELECT {CAR_COLUMNS} FROM cars ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(cars)
    }

    #[instrument(skip(self))]
    async fn get_car(&self, id: CarId) -> Result<Option<Car>, StoreError> {
        let car = sqlx::query_as::<_, Car>(&format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(car)
    }

    #[instrument(skip(self))]
    async fn create_car(&self, dto: CreateCarDto) -> Result<Car, StoreError> {
        sqlx::query_as::<_, Car>(&format!(
            r#"INSERT INTO cars (ref_no, make, model, year, color, mileage_km, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CAR_COLUMNS}"#
        ))
        .bind(&dto.ref_no)
        .bind(&dto.make)
        .bind(&dto.model)
        .bind(dto.year)
        .bind(&dto.color)
        .bind(dto.mileage_km)
        .bind(dto.status.unwrap_or_default())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, "car"))
    }

    #[instrument(skip(self))]
    async fn update_car(&self, id: CarId, dto: UpdateCarDto) -> Result<Option<Car>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Car>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut car) = current else {
            return Ok(None);
        };
        dto.apply_to(&mut car);

        let updated = sqlx::query_as::<_, Car>(&format!(
            r#"UPDATE cars
            SET ref_no = $2, make = $3, model = $4, year = $5, color = $6,
                mileage_km = $7, status = $8, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING {CAR_COLUMNS}"#
        ))
        .bind(id)
        .bind(&car.ref_no)
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(&car.color)
        .bind(car.mileage_km)
        .bind(car.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify(e, "car"))?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    #[instrument(skip(self))]
    async fn delete_car(&self, id: CarId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
