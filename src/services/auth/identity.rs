use serde::{Deserialize, Serialize};

use crate::services::auth::roles::RoleId;

/// Authenticated caller recovered from a verified token.
///
/// `id` is the internal user id (not the public sqids id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub role_id: RoleId,
    pub email: Option<String>,
}

/// Token payload. `iat`/`exp` are unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub id: i64,
    pub username: String,
    pub role_id: RoleId,
    #[serde(default)]
    pub email: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl IdentityClaims {
    pub fn new(identity: &Identity, iat: i64, exp: i64) -> Self {
        Self {
            id: identity.id,
            username: identity.username.clone(),
            role_id: identity.role_id,
            email: identity.email.clone(),
            iat,
            exp,
        }
    }
}

impl From<IdentityClaims> for Identity {
    fn from(c: IdentityClaims) -> Self {
        Self {
            id: c.id,
            username: c.username,
            role_id: c.role_id,
            email: c.email,
        }
    }
}
