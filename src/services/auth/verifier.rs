use axum::http::{HeaderMap, header};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use tracing::{debug, warn};

use crate::services::auth::error::AuthError;
use crate::services::auth::identity::{Identity, IdentityClaims};

/// HS256 bearer-token verifier.
///
/// The signing secret is injected at construction. Without one, every
/// verification fails closed with `AuthError::MissingSecret`.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: Option<DecodingKey>,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("configured", &self.decoding_key.is_some())
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: Option<&str>, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;

        Self {
            decoding_key: secret.map(|s| DecodingKey::from_secret(s.as_bytes())),
            validation,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.decoding_key.is_some()
    }

    /// Verify the `Authorization: Bearer <token>` header of a request.
    ///
    /// Checks, in order: secret configured, header present, Bearer scheme,
    /// non-empty token, then signature and expiry.
    pub fn verify(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        let key = self.decoding_key.as_ref().ok_or_else(|| {
            warn!("token verification attempted without a configured signing secret");
            AuthError::MissingSecret
        })?;
        let token = bearer_token(headers)?;
        self.decode(key, token)
    }

    /// Verify a raw token string (no header parsing).
    #[cfg(test)]
    pub(crate) fn verify_token(&self, token: &str) -> Result<Identity, AuthError> {
        let key = self
            .decoding_key
            .as_ref()
            .ok_or(AuthError::MissingSecret)?;
        self.decode(key, token)
    }

    fn decode(&self, key: &DecodingKey, token: &str) -> Result<Identity, AuthError> {
        match jsonwebtoken::decode::<IdentityClaims>(token, key, &self.validation) {
            Ok(data) => Ok(data.claims.into()),
            Err(err) => {
                let kind = classify(&err);
                debug!(error = %err, outcome = %kind, "bearer token rejected");
                Err(kind)
            }
        }
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;

    // Non-visible-ASCII header values cannot be a Bearer credential
    let raw = value.to_str().map_err(|_| AuthError::InvalidScheme)?.trim();

    match raw.strip_prefix("Bearer") {
        Some("") => Err(AuthError::EmptyToken),
        Some(rest) if rest.starts_with(' ') => {
            let token = rest.trim();
            if token.is_empty() {
                Err(AuthError::EmptyToken)
            } else {
                Ok(token)
            }
        }
        _ => Err(AuthError::InvalidScheme),
    }
}

fn classify(err: &jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidToken
        | ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AuthError::InvalidToken,
        _ => AuthError::Failed,
    }
}
