//! # Carlot DB
//!
//! Persistence layer for the Carlot API.
//!
//! - [`store`]: the [`RbacStore`], [`CredentialStore`] and [`CarStore`] traits
//! - [`postgres`]: [`PgStore`], the SQLx/PostgreSQL implementation
//! - [`memory`]: [`MemoryStore`], an in-process implementation for tests
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use carlot_db::{init_db_pool, PgStore, RbacStore};
//!
//! let pool = init_db_pool(&database_url).await?;
//! carlot_db::MIGRATOR.run(&pool).await?;
//! let store: Arc<dyn RbacStore> = Arc::new(PgStore::new(pool));
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use sqlx::PgPool;
pub use store::{CarStore, CredentialStore, RbacStore, StoreError};

/// Embedded schema migrations from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Creates a PostgreSQL connection pool.
///
/// The acquire timeout bounds how long a request can wait for a connection,
/// so an exhausted pool surfaces as an error instead of a hung request.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await
}
