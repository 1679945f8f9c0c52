//! HTTP server configuration.
//!
//! # Environment Variables
//!
//! - `HOST`: bind address (default `0.0.0.0`)
//! - `PORT`: listen port (default `8080`)
//! - `PERMISSION_LOOKUP_TIMEOUT_MS`: upper bound for one permission lookup
//!   against the store (default `2000`)
//! - `BCRYPT_COST`: work factor for passwords set through the API
//!   (default `12`, accepted range `4..=31`)

use std::env;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// A lookup exceeding this bound is treated as a resolution failure.
    pub permission_lookup_timeout: Duration,
    pub bcrypt_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            permission_lookup_timeout: Duration::from_millis(2000),
            bcrypt_cost: 12,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            permission_lookup_timeout: env::var("PERMISSION_LOOKUP_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms: &u64| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.permission_lookup_timeout),
            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|cost: &u32| (4..=31).contains(cost))
                .unwrap_or(defaults.bcrypt_cost),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
