//! # Carlot RBAC
//!
//! Resolves the effective permission set of a user through the
//! user → roles → permissions graph.
//!
//! Nothing is cached. Every call reads the store, so a grant revoked
//! between two requests is enforced on the second one.
//!
//! # Example
//!
//! ```ignore
//! use std::{sync::Arc, time::Duration};
//! use carlot_rbac::PermissionResolver;
//!
//! let resolver = PermissionResolver::new(Arc::new(store), Duration::from_secs(2));
//! if resolver.has(user_id, "car-delete").await? {
//!     // ...
//! }
//! ```

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use carlot_db::{RbacStore, StoreError};
use carlot_models::ids::UserId;
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("permission store failed: {0}")]
    Store(#[from] StoreError),
    #[error("permission lookup timed out after {0:?}")]
    TimedOut(Duration),
}

#[derive(Clone)]
pub struct PermissionResolver {
    store: Arc<dyn RbacStore>,
    timeout: Duration,
}

impl std::fmt::Debug for PermissionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionResolver")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl PermissionResolver {
    pub fn new(store: Arc<dyn RbacStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// All permission slugs granted to `user_id` through its roles.
    ///
    /// A user without roles has an empty set. Store failures and lookups
    /// exceeding the configured timeout are errors; callers must deny.
    #[instrument(skip(self))]
    pub async fn permissions_of(&self, user_id: UserId) -> Result<HashSet<String>, ResolutionError> {
        match tokio::time::timeout(self.timeout, self.store.permissions_of(user_id)).await {
            Ok(Ok(permissions)) => Ok(permissions),
            Ok(Err(err)) => {
                tracing::error!(%user_id, error = %err, "permission lookup failed");
                Err(err.into())
            }
            Err(_) => {
                tracing::error!(%user_id, timeout = ?self.timeout, "permission lookup timed out");
                Err(ResolutionError::TimedOut(self.timeout))
            }
        }
    }

    /// Whether `user_id` holds `slug`.
    pub async fn has(&self, user_id: UserId, slug: &str) -> Result<bool, ResolutionError> {
        Ok(self.permissions_of(user_id).await?.contains(slug))
    }

    /// Effective permissions as a sorted list.
    pub async fn sorted_permissions_of(
        &self,
        user_id: UserId,
    ) -> Result<Vec<String>, ResolutionError> {
        let mut permissions: Vec<String> = self.permissions_of(user_id).await?.into_iter().collect();
        permissions.sort();
        Ok(permissions)
    }
}
