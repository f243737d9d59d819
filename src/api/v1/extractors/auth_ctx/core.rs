use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::types::AllowList;
use crate::services::auth::{AuthError, Identity, gate};
use crate::state::AppState;

/// Verified caller whose role is in `R::ROLES`.
///
/// Declare it before any body extractor so that authentication failures
/// are answered before the JSON body is parsed.
pub struct AuthCtx<R> {
    pub identity: Identity,
    _allow: PhantomData<R>,
}

impl<R> AuthCtx<R> {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            _allow: PhantomData,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.identity.id
    }

    /// Re-check the caller against a stricter allow-list, for rules that
    /// depend on the request body (e.g. a role change inside an admin route).
    pub fn narrow<S: AllowList>(&self) -> Result<AuthCtx<S>, AuthError> {
        gate::permit(self.identity.clone(), S::ROLES).map(AuthCtx::new)
    }
}

impl<R: AllowList> FromRequestParts<AppState> for AuthCtx<R> {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = state.auth.authorize(&parts.headers, R::ROLES)?;
        Ok(Self::new(identity))
    }
}

impl<R> std::fmt::Debug for AuthCtx<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthCtx")
            .field("identity", &self.identity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::v1::extractors::auth_ctx::{AdminCtx, SuperAdminCtx, SuperAdminOnly};
    use crate::services::auth::roles;

    fn admin_ctx(role_id: roles::RoleId) -> AdminCtx {
        AuthCtx::new(Identity {
            id: 9,
            username: "ops".to_string(),
            role_id,
            email: None,
        })
    }

    #[test]
    fn admin_cannot_narrow_to_superadmin() {
        let err = admin_ctx(roles::ADMIN).narrow::<SuperAdminOnly>().unwrap_err();
        assert_eq!(err, AuthError::Forbidden);
    }

    #[test]
    fn superadmin_narrows_and_keeps_identity() {
        let ctx: SuperAdminCtx = admin_ctx(roles::SUPERADMIN).narrow().expect("superadmin");
        assert_eq!(ctx.user_id(), 9);
        assert_eq!(ctx.identity.role_id, roles::SUPERADMIN);
    }
}
