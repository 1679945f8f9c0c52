use std::sync::Arc;

use carlot_auth::TokenCodec;
use carlot_config::{CorsConfig, JwtConfig, ServerConfig};
use carlot_db::{CarStore, CredentialStore, PgPool, PgStore, RbacStore};
use carlot_rbac::PermissionResolver;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub server_config: ServerConfig,
    pub cors_config: CorsConfig,
    pub codec: TokenCodec,
    pub resolver: PermissionResolver,
    pub rbac: Arc<dyn RbacStore>,
    pub credentials: Arc<dyn CredentialStore>,
    pub cars: Arc<dyn CarStore>,
}

impl AppState {
    /// Build the state over one store implementing every persistence trait.
    pub fn new<S>(
        store: Arc<S>,
        jwt_config: JwtConfig,
        server_config: ServerConfig,
        cors_config: CorsConfig,
    ) -> Self
    where
        S: RbacStore + CredentialStore + CarStore + 'static,
    {
        let rbac: Arc<dyn RbacStore> = store.clone();
        let resolver = PermissionResolver::new(rbac.clone(), server_config.permission_lookup_timeout);

        Self {
            codec: TokenCodec::from_config(&jwt_config),
            resolver,
            rbac,
            credentials: store.clone(),
            cars: store,
            jwt_config,
            server_config,
            cors_config,
        }
    }
}

pub fn init_app_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(PgStore::new(pool)),
        JwtConfig::from_env(),
        ServerConfig::from_env(),
        CorsConfig::from_env(),
    )
}

#[cfg(any(test, feature = "test-utils"))]
mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use carlot_auth::Clock;
    use carlot_config::{CorsConfig, JwtConfig, ServerConfig};
    use carlot_db::MemoryStore;

    use super::AppState;

    pub const TEST_JWT_SECRET: &str = "test-secret-key-at-least-32-characters-long";

    impl AppState {
        /// State over an in-memory store with a fixed secret and a short
        /// permission lookup timeout.
        pub fn in_memory(store: Arc<MemoryStore>) -> Self {
            let jwt_config = JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
                access_token_expiry: 3600,
            };
            let server_config = ServerConfig {
                permission_lookup_timeout: Duration::from_millis(200),
                bcrypt_cost: 4,
                ..ServerConfig::default()
            };
            let cors_config = CorsConfig {
                allowed_origins: vec!["http://localhost:8080".to_string()],
            };

            Self::new(store, jwt_config, server_config, cors_config)
        }

        /// Swap the clock the token codec issues and validates against.
        pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
            self.codec = self.codec.with_clock(clock);
            self
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use test_support::TEST_JWT_SECRET;
