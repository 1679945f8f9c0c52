//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};

/// Claims carried by an access token.
///
/// The token only names its subject. Roles and permissions are resolved
/// from the store on every request, so a revoked grant takes effect
/// without waiting for the token to expire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim), encoded as a decimal string.
    pub sub: String,
    /// Token issued-at timestamp (Unix seconds)
    pub iat: i64,
    /// Token expiration timestamp (Unix seconds)
    pub exp: i64,
}
