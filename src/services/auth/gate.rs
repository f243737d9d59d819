use axum::http::HeaderMap;
use tracing::{debug, warn};

use crate::services::auth::error::AuthError;
use crate::services::auth::identity::Identity;
use crate::services::auth::roles::RoleId;
use crate::services::auth::verifier::TokenVerifier;

/// Authenticate the request, then require the caller's role to be in `allowed`.
///
/// Verification failures are returned unchanged (401/500). A role outside
/// the allow-list is `AuthError::Forbidden` (403).
pub fn authorize(
    verifier: &TokenVerifier,
    headers: &HeaderMap,
    allowed: &[RoleId],
) -> Result<Identity, AuthError> {
    let identity = verifier.verify(headers).map_err(|err| {
        debug!(error = %err, "authentication failed");
        err
    })?;

    permit(identity, allowed)
}

/// Role check alone, for an identity that was already authenticated.
pub fn permit(identity: Identity, allowed: &[RoleId]) -> Result<Identity, AuthError> {
    if !allowed.contains(&identity.role_id) {
        warn!(
            user_id = identity.id,
            role_id = identity.role_id,
            ?allowed,
            "role not permitted"
        );
        return Err(AuthError::Forbidden);
    }

    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::roles;
    use crate::services::auth::test_support::{SECRET, bearer_headers, identity, sign};

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(Some(SECRET), 0)
    }

    #[test]
    fn regular_user_is_denied_on_admin_operation() {
        let token = sign(SECRET, &identity(42, roles::USER), 3600);
        let err = authorize(&verifier(), &bearer_headers(&token), &[1, 2]).unwrap_err();

        assert_eq!(err, AuthError::Forbidden);
        assert_eq!(err.to_string(), "insufficient permission");
    }

    #[test]
    fn regular_user_is_allowed_when_listed() {
        let who = identity(42, roles::USER);
        let token = sign(SECRET, &who, 3600);

        let got = authorize(&verifier(), &bearer_headers(&token), &[1, 2, 3]).expect("allowed");
        assert_eq!(got, who);
    }

    #[test]
    fn authentication_errors_pass_through_before_role_check() {
        // Empty allow-list would be a 403; a missing header must still be 401.
        let err = authorize(&verifier(), &HeaderMap::new(), &[]).unwrap_err();
        assert_eq!(err, AuthError::MissingHeader);

        let expired = sign(SECRET, &identity(1, roles::SUPERADMIN), -3600);
        let err = authorize(&verifier(), &bearer_headers(&expired), roles::ADMINS).unwrap_err();
        assert_eq!(err, AuthError::Expired);

        let forged = sign("wrong", &identity(1, roles::SUPERADMIN), 3600);
        let err = authorize(&verifier(), &bearer_headers(&forged), roles::ADMINS).unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[test]
    fn unconfigured_secret_is_a_server_error() {
        let token = sign(SECRET, &identity(1, roles::SUPERADMIN), 3600);
        let err = authorize(
            &TokenVerifier::new(None, 0),
            &bearer_headers(&token),
            roles::ANY_ROLE,
        )
        .unwrap_err();

        assert_eq!(err, AuthError::MissingSecret);
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn permit_checks_only_the_role() {
        let admin = identity(5, roles::ADMIN);
        assert_eq!(
            permit(admin.clone(), roles::SUPERADMIN_ONLY),
            Err(AuthError::Forbidden)
        );
        assert_eq!(permit(admin.clone(), roles::ADMINS), Ok(admin));
    }

    #[test]
    fn superadmin_only_list_rejects_admin_tokens() {
        let admin = bearer_headers(&sign(SECRET, &identity(5, roles::ADMIN), 3600));
        assert_eq!(
            authorize(&verifier(), &admin, roles::SUPERADMIN_ONLY),
            Err(AuthError::Forbidden)
        );

        let root = identity(1, roles::SUPERADMIN);
        let headers = bearer_headers(&sign(SECRET, &root, 3600));
        assert_eq!(authorize(&verifier(), &headers, roles::SUPERADMIN_ONLY), Ok(root));
    }

    #[test]
    fn repeated_calls_give_the_same_outcome() {
        let v = verifier();
        let ok = bearer_headers(&sign(SECRET, &identity(5, roles::ADMIN), 3600));
        let denied = bearer_headers(&sign(SECRET, &identity(6, roles::USER), 3600));

        let first = authorize(&v, &ok, roles::ADMINS);
        let second = authorize(&v, &ok, roles::ADMINS);
        assert_eq!(first, second);
        assert!(first.is_ok());

        let first = authorize(&v, &denied, roles::ADMINS);
        let second = authorize(&v, &denied, roles::ADMINS);
        assert_eq!(first, second);
        assert_eq!(first, Err(AuthError::Forbidden));
    }
}
