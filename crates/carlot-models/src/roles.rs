//! Role and permission domain models and DTOs.
//!
//! Roles bundle permissions; users hold roles. Both join relations
//! (`role_user`, `permission_role`) are idempotent sets.

use crate::ids::{PermissionId, RoleId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Returns true for lowercase kebab-case identifiers such as `car-read`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        Err(ValidationError::new("slug")
            .with_message("slug must be lowercase letters, digits and single hyphens".into()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    pub id: PermissionId,
    pub name: String,
    pub slug: String,
    pub module: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoleDto {
    #[validate(length(min = 2, max = 100, message = "name must be 2-100 characters"))]
    pub name: String,
    #[validate(
        length(min = 2, max = 100, message = "slug must be 2-100 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePermissionDto {
    #[validate(length(min = 2, max = 150, message = "name must be 2-150 characters"))]
    pub name: String,
    #[validate(
        length(min = 2, max = 150, message = "slug must be 2-150 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: String,
    #[validate(length(max = 100, message = "module must be at most 100 characters"))]
    pub module: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRoleDto {
    #[validate(length(min = 2, max = 100, message = "name must be 2-100 characters"))]
    pub name: Option<String>,
    #[validate(
        length(min = 2, max = 100, message = "slug must be 2-100 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: Option<String>,
    pub description: Option<String>,
}

impl UpdateRoleDto {
    pub fn apply_to(self, role: &mut Role) {
        if let Some(name) = self.name {
            role.name = name;
        }
        if let Some(slug) = self.slug {
            role.slug = slug;
        }
        if self.description.is_some() {
            role.description = self.description;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePermissionDto {
    #[validate(length(min = 2, max = 150, message = "name must be 2-150 characters"))]
    pub name: Option<String>,
    #[validate(
        length(min = 2, max = 150, message = "slug must be 2-150 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: Option<String>,
    #[validate(length(max = 100, message = "module must be at most 100 characters"))]
    pub module: Option<String>,
}

impl UpdatePermissionDto {
    pub fn apply_to(self, permission: &mut Permission) {
        if let Some(name) = self.name {
            permission.name = name;
        }
        if let Some(slug) = self.slug {
            permission.slug = slug;
        }
        if self.module.is_some() {
            permission.module = self.module;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignRoleDto {
    pub user_id: UserId,
    pub role_id: RoleId,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GrantPermissionDto {
    pub permission_id: PermissionId,
}

/// Effective permission set of the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPermissionsResponse {
    pub user_id: UserId,
    pub permissions: Vec<String>,
}
