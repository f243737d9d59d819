/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::AuthService;

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    let auth = AuthService::new(
        config.jwt_secret.as_deref(),
        config.token_ttl_seconds,
        config.token_leeway_seconds,
    );

    if !auth.is_configured() {
        tracing::error!("JWT_SECRET is not set; protected routes and login will respond with 500");
    }

    Arc::new(auth)
}
