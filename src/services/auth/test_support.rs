use axum::http::{HeaderMap, HeaderValue, header};
use jsonwebtoken::{Algorithm, EncodingKey, Header};

use crate::services::auth::identity::{Identity, IdentityClaims};
use crate::services::auth::roles::RoleId;

pub const SECRET: &str = "test-signing-secret";

pub fn identity(id: i64, role_id: RoleId) -> Identity {
    Identity {
        id,
        username: format!("user{id}"),
        role_id,
        email: Some(format!("user{id}@example.com")),
    }
}

/// Sign `identity` with `exp = now + ttl_seconds` (negative ttl = already expired).
pub fn sign(secret: &str, identity: &Identity, ttl_seconds: i64) -> String {
    sign_with_alg(Algorithm::HS256, secret, identity, ttl_seconds)
}

pub fn sign_with_alg(
    alg: Algorithm,
    secret: &str,
    identity: &Identity,
    ttl_seconds: i64,
) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = IdentityClaims::new(identity, now, now + ttl_seconds);
    jsonwebtoken::encode(
        &Header::new(alg),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("sign test token")
}

pub fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).expect("header value"),
    );
    headers
}
