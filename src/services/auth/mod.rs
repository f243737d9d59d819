//! Bearer-token authentication and role-based authorization.
//!
//! - `verifier`: `Authorization: Bearer <jwt>` → `Identity`
//! - `gate`: verifier + role allow-list
//! - `issuer`: signs tokens at login
pub mod error;
pub mod factory;
pub mod gate;
pub mod identity;
pub mod issuer;
pub mod roles;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_support;

use axum::http::HeaderMap;

pub use error::AuthError;
pub use factory::build_auth_service;
pub use identity::Identity;
pub use issuer::{IssuedToken, TokenIssuer};
pub use roles::RoleId;
pub use verifier::TokenVerifier;

/// Process-wide auth facade held in `AppState` (behind `Arc`).
///
/// Immutable after construction; both halves share the same HS256 secret.
#[derive(Clone, Debug)]
pub struct AuthService {
    verifier: TokenVerifier,
    issuer: TokenIssuer,
}

impl AuthService {
    pub fn new(secret: Option<&str>, token_ttl_seconds: u64, leeway_seconds: u64) -> Self {
        Self {
            verifier: TokenVerifier::new(secret, leeway_seconds),
            issuer: TokenIssuer::new(secret, token_ttl_seconds),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.verifier.is_configured()
    }

    pub fn authorize(
        &self,
        headers: &HeaderMap,
        allowed: &[RoleId],
    ) -> Result<Identity, AuthError> {
        gate::authorize(&self.verifier, headers, allowed)
    }

    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, AuthError> {
        self.issuer.issue(identity)
    }
}
