//! User creation and role assignment.

use anyhow::{Context, anyhow};
use carlot_core::password::hash_password_with_cost;
use carlot_db::{CredentialStore, RbacStore};
use carlot_models::users::{NewUser, User};

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Slug of a role to assign after creation.
    pub role: Option<String>,
}

/// Create a user with a bcrypt-hashed password, optionally assigning a role.
/// An unknown role slug fails before the user is inserted.
pub async fn create_account(
    credentials: &dyn CredentialStore,
    rbac: &dyn RbacStore,
    account: NewAccount,
    cost: u32,
) -> anyhow::Result<User> {
    if account.password.len() < 8 {
        return Err(anyhow!("password must be at least 8 characters"));
    }

    let role = match account.role.as_deref() {
        Some(slug) => Some(
            rbac.find_role_by_slug(slug)
                .await?
                .ok_or_else(|| anyhow!("no role with slug {}", slug))?,
        ),
        None => None,
    };

    let password_hash =
        hash_password_with_cost(&account.password, cost).map_err(|e| e.error)?;

    let user = credentials
        .create_user(NewUser {
            name: account.name,
            email: account.email.to_lowercase(),
            password_hash,
        })
        .await
        .context("failed to create user")?;

    if let Some(role) = role {
        rbac.assign_role(user.id, role.id).await?;
    }

    Ok(user)
}

/// Assign the role `role_slug` to the user with `email`. Assigning a role
/// the user already holds is a no-op.
pub async fn assign_role(
    credentials: &dyn CredentialStore,
    rbac: &dyn RbacStore,
    email: &str,
    role_slug: &str,
) -> anyhow::Result<()> {
    let user = credentials
        .find_credentials(email)
        .await?
        .ok_or_else(|| anyhow!("no user with email {}", email))?;

    let role = rbac
        .find_role_by_slug(role_slug)
        .await?
        .ok_or_else(|| anyhow!("no role with slug {}", role_slug))?;

    rbac.assign_role(user.id, role.id).await?;
    Ok(())
}
