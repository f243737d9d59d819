use jsonwebtoken::{Algorithm, EncodingKey, Header};
use tracing::{error, warn};

use crate::services::auth::error::AuthError;
use crate::services::auth::identity::{Identity, IdentityClaims};

/// Signed token handed back to the client at login.
#[derive(Clone, Debug)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: Option<EncodingKey>,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("configured", &self.encoding_key.is_some())
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(secret: Option<&str>, ttl_seconds: u64) -> Self {
        Self {
            encoding_key: secret.map(|s| EncodingKey::from_secret(s.as_bytes())),
            ttl_seconds,
        }
    }

    /// Sign an HS256 token for `identity`, valid for `ttl_seconds` from now.
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, AuthError> {
        let key = self.encoding_key.as_ref().ok_or_else(|| {
            warn!("token issuance attempted without a configured signing secret");
            AuthError::MissingSecret
        })?;

        let iat = chrono::Utc::now().timestamp();
        let exp = iat.saturating_add(i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX));
        let claims = IdentityClaims::new(identity, iat, exp);

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());

        let token = jsonwebtoken::encode(&header, &claims, key).map_err(|e| {
            error!(error = %e, user_id = identity.id, "failed to sign JWT");
            AuthError::Failed
        })?;

        Ok(IssuedToken {
            token,
            expires_in: self.ttl_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::roles;
    use crate::services::auth::test_support::{SECRET, identity};
    use crate::services::auth::verifier::TokenVerifier;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let issuer = TokenIssuer::new(Some(SECRET), 365 * 24 * 60 * 60);
        let who = identity(11, roles::ADMIN);

        let issued = issuer.issue(&who).expect("issue");
        assert_eq!(issued.expires_in, 365 * 24 * 60 * 60);

        let got = TokenVerifier::new(Some(SECRET), 0)
            .verify_token(&issued.token)
            .expect("verify");
        assert_eq!(got, who);
    }

    #[test]
    fn issued_token_is_rejected_under_another_secret() {
        let issued = TokenIssuer::new(Some(SECRET), 60)
            .issue(&identity(1, roles::USER))
            .expect("issue");

        let err = TokenVerifier::new(Some("rotated"), 0)
            .verify_token(&issued.token)
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[test]
    fn issuing_without_secret_is_a_server_error() {
        let err = TokenIssuer::new(None, 60)
            .issue(&identity(1, roles::USER))
            .unwrap_err();
        assert_eq!(err, AuthError::MissingSecret);
    }
}
