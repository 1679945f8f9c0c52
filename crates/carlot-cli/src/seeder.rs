//! Default permissions and roles.
//!
//! Seeding is idempotent: existing permissions and roles are reused and
//! grants that already exist are left alone.

use std::collections::HashMap;

use carlot_core::permissions::{self, CAR_READ};
use carlot_db::RbacStore;
use carlot_models::ids::PermissionId;
use carlot_models::roles::{CreatePermissionDto, CreateRoleDto, Role};

pub const ADMIN_ROLE: &str = "admin";
pub const VIEWER_ROLE: &str = "viewer";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub permissions_created: usize,
    pub roles_created: usize,
}

/// Seed every known permission plus the `admin` (all permissions) and
/// `viewer` (`car-read`) roles.
pub async fn seed_defaults(store: &dyn RbacStore) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();

    let mut by_slug: HashMap<String, PermissionId> = store
        .list_permissions()
        .await?
        .into_iter()
        .map(|p| (p.slug, p.id))
        .collect();

    for (slug, name, module) in permissions::ALL {
        if by_slug.contains_key(*slug) {
            continue;
        }
        let created = store
            .create_permission(CreatePermissionDto {
                name: name.to_string(),
                slug: slug.to_string(),
                module: Some(module.to_string()),
            })
            .await?;
        by_slug.insert(created.slug, created.id);
        report.permissions_created += 1;
    }

    let admin = ensure_role(store, "Administrator", ADMIN_ROLE, "Full access", &mut report).await?;
    for (slug, _, _) in permissions::ALL {
        if let Some(id) = by_slug.get(*slug) {
            store.grant_permission(admin.id, *id).await?;
        }
    }

    let viewer = ensure_role(store, "Viewer", VIEWER_ROLE, "Read-only access to cars", &mut report)
        .await?;
    if let Some(id) = by_slug.get(CAR_READ) {
        store.grant_permission(viewer.id, *id).await?;
    }

    Ok(report)
}

async fn ensure_role(
    store: &dyn RbacStore,
    name: &str,
    slug: &str,
    description: &str,
    report: &mut SeedReport,
) -> anyhow::Result<Role> {
    if let Some(role) = store.find_role_by_slug(slug).await? {
        return Ok(role);
    }

    let role = store
        .create_role(CreateRoleDto {
            name: name.to_string(),
            slug: slug.to_string(),
            description: Some(description.to_string()),
        })
        .await?;
    report.roles_created += 1;
    Ok(role)
}
